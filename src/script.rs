//! ER script generation from a parsed model.

use crate::model::{Attribute, ErModel};

/// Generate the renderer's ER script for a model.
///
/// Entity blocks come first, in input order, followed by one line per relation.
#[must_use]
pub fn generate_script(model: &ErModel) -> String {
    let mut script = String::new();

    for entity in &model.entities {
        script.push_str(&format!("{} {{\n", entity.name));
        for attr in &entity.attributes {
            script.push_str(&attribute_line(attr));
            script.push('\n');
        }
        script.push_str("}\n\n");
    }

    for relation in &model.relations {
        script.push_str(&format!(
            "{} {} -- {} {}\n",
            relation.entity1, relation.cardinality1, relation.cardinality2, relation.entity2
        ));
    }

    script
}

fn attribute_line(attr: &Attribute) -> String {
    let mut line = format!("    {} {}", attr.name, attr.kind);
    if attr.primary_key {
        line.push_str(" PK");
    }
    if !attr.nullable {
        line.push_str(" NOT NULL");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, Relation};

    fn attr(name: &str, kind: &str, primary_key: bool, nullable: bool) -> Attribute {
        Attribute { name: name.into(), kind: kind.into(), primary_key, nullable }
    }

    fn blog() -> ErModel {
        ErModel {
            entities: vec![
                Entity {
                    name: "user".into(),
                    attributes: vec![
                        attr("id", "int", true, true),
                        attr("email", "varchar", false, false),
                        attr("bio", "text", false, true),
                    ],
                },
                Entity { name: "post".into(), attributes: vec![attr("id", "int", true, false)] },
            ],
            relations: vec![Relation {
                entity1: "user".into(),
                entity2: "post".into(),
                cardinality1: "1".into(),
                cardinality2: "*".into(),
            }],
        }
    }

    #[test]
    fn full_script() {
        let expected = "user {\n    id int PK\n    email varchar NOT NULL\n    bio text\n}\n\n\
                        post {\n    id int PK NOT NULL\n}\n\n\
                        user 1 -- * post\n";
        assert_eq!(generate_script(&blog()), expected);
    }

    #[test]
    fn numeric_cardinality_from_payload() {
        let model: ErModel = serde_json::from_value(serde_json::json!({
            "entities": [{"name": "a"}, {"name": "b"}],
            "relations": [{"entity1": "a", "entity2": "b", "cardinality1": 1, "cardinality2": "*"}]
        }))
        .unwrap();
        assert!(generate_script(&model).ends_with("a 1 -- * b\n"));
    }

    #[test]
    fn empty_model_is_empty_script() {
        assert_eq!(generate_script(&ErModel::default()), "");
    }

    #[test]
    fn markers() {
        assert_eq!(attribute_line(&attr("id", "int", true, true)), "    id int PK");
        assert_eq!(attribute_line(&attr("n", "text", false, false)), "    n text NOT NULL");
        assert_eq!(attribute_line(&attr("n", "text", false, true)), "    n text");
    }

    #[test]
    fn block_and_relation_order_follow_input() {
        let mut model = blog();
        model.entities.reverse();
        model.relations.push(Relation {
            entity1: "post".into(),
            entity2: "tag".into(),
            cardinality1: String::new(),
            cardinality2: String::new(),
        });
        let script = generate_script(&model);

        let headers: Vec<&str> = script.lines().filter(|l| l.ends_with(" {")).collect();
        assert_eq!(headers, ["post {", "user {"]);

        let relations: Vec<&str> = script.lines().filter(|l| l.contains(" -- ")).collect();
        assert_eq!(relations, ["user 1 -- * post", "post  --  tag"]);
    }
}
