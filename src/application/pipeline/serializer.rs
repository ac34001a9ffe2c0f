//! Serializer - renders entities and collections as JSON
//!
//! Entities describe themselves as a list of named [`Node`]s. Nested entities
//! are rendered inline unless they are already being rendered further up the
//! same pass, in which case their identifier string is emitted instead.

use std::any::{Any, TypeId};

use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};

use super::PipelineError;

/// One field value of a normalized entity
pub enum Node<'a> {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(&'a str),
    DateTime(DateTime<Utc>),
    Entity(&'a dyn Normalize),
    List(Vec<Node<'a>>),
}

impl<'a> Node<'a> {
    pub fn text(value: &'a Option<String>) -> Self {
        value.as_deref().map_or(Node::Null, Node::Text)
    }

    pub fn integer<T: Into<i64> + Copy>(value: Option<T>) -> Self {
        value.map_or(Node::Null, |v| Node::Integer(v.into()))
    }
}

/// An entity that can be rendered by the serializer
pub trait Normalize: EntityType {
    /// Stable external key, used in place of a nested object on cycles
    fn identifier(&self) -> Option<&str>;

    /// Field names and values in output order
    fn normalize(&self) -> Vec<(&'static str, Node<'_>)>;
}

/// Concrete type of an entity, reachable through `dyn Normalize`
pub trait EntityType {
    fn entity_type(&self) -> TypeId;
}

impl<T: Any> EntityType for T {
    fn entity_type(&self) -> TypeId {
        TypeId::of::<T>()
    }
}

/// Render a single entity as a JSON object
pub fn to_json(entity: &dyn Normalize) -> Result<Value, PipelineError> {
    Pass::default().entity(entity)
}

/// Render a collection as a JSON array, preserving its order
pub fn to_json_collection<N: Normalize>(entities: &[N]) -> Result<Value, PipelineError> {
    let mut pass = Pass::default();
    entities
        .iter()
        .map(|entity| pass.entity(entity))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

/// State of one serialization pass: the entities currently being rendered
///
/// An entity embedded at offset 0 of its parent shares the parent's address,
/// so identity is the address together with the concrete type.
#[derive(Default)]
struct Pass {
    path: Vec<(*const (), TypeId)>,
}

impl Pass {
    fn entity(&mut self, entity: &dyn Normalize) -> Result<Value, PipelineError> {
        let key = (
            entity as *const _ as *const (),
            EntityType::entity_type(entity),
        );
        if self.path.contains(&key) {
            return entity
                .identifier()
                .map(|id| Value::String(id.to_string()))
                .ok_or_else(|| {
                    PipelineError::Serialization(
                        "circular reference to an entity without identifier".to_string(),
                    )
                });
        }

        self.path.push(key);
        let rendered = entity
            .normalize()
            .into_iter()
            .map(|(name, node)| self.node(node).map(|value| (name.to_string(), value)))
            .collect::<Result<Map<_, _>, _>>();
        self.path.pop();

        rendered.map(Value::Object)
    }

    fn node(&mut self, node: Node<'_>) -> Result<Value, PipelineError> {
        Ok(match node {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(b),
            Node::Integer(n) => Value::Number(n.into()),
            Node::Float(f) => Number::from_f64(f).map(Value::Number).ok_or_else(|| {
                PipelineError::Serialization(format!("{f} has no JSON representation"))
            })?,
            Node::Text(text) => Value::String(text.to_string()),
            Node::DateTime(at) => Value::String(at.to_rfc3339()),
            Node::Entity(entity) => self.entity(entity)?,
            Node::List(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.node(item))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::OnceCell;
    use std::rc::Rc;

    use crate::domain::entities::Character;
    use crate::domain::value_objects::Identifier;

    struct Guild {
        identifier: String,
        leader: OnceCell<Rc<Member>>,
    }

    struct Member {
        identifier: String,
        guild: Rc<Guild>,
        tags: Vec<String>,
    }

    impl Normalize for Guild {
        fn identifier(&self) -> Option<&str> {
            Some(&self.identifier)
        }

        fn normalize(&self) -> Vec<(&'static str, Node<'_>)> {
            vec![
                ("identifier", Node::Text(&self.identifier)),
                (
                    "leader",
                    self.leader.get().map_or(Node::Null, |m| Node::Entity(&**m)),
                ),
            ]
        }
    }

    impl Normalize for Member {
        fn identifier(&self) -> Option<&str> {
            Some(&self.identifier)
        }

        fn normalize(&self) -> Vec<(&'static str, Node<'_>)> {
            vec![
                ("identifier", Node::Text(&self.identifier)),
                ("guilds", Node::List(vec![Node::Entity(&*self.guild)])),
                (
                    "tags",
                    Node::List(self.tags.iter().map(|t| Node::Text(t)).collect()),
                ),
            ]
        }
    }

    #[repr(C)]
    struct Banner {
        crest: Crest,
        motto: String,
    }

    struct Crest {
        identifier: String,
    }

    impl Normalize for Banner {
        fn identifier(&self) -> Option<&str> {
            None
        }

        fn normalize(&self) -> Vec<(&'static str, Node<'_>)> {
            vec![
                ("crest", Node::Entity(&self.crest)),
                ("motto", Node::Text(&self.motto)),
            ]
        }
    }

    impl Normalize for Crest {
        fn identifier(&self) -> Option<&str> {
            Some(&self.identifier)
        }

        fn normalize(&self) -> Vec<(&'static str, Node<'_>)> {
            vec![("identifier", Node::Text(&self.identifier))]
        }
    }

    struct Gauge(f64);

    impl Normalize for Gauge {
        fn identifier(&self) -> Option<&str> {
            None
        }

        fn normalize(&self) -> Vec<(&'static str, Node<'_>)> {
            vec![("level", Node::Float(self.0)), ("on", Node::Bool(true))]
        }
    }

    fn sample_character() -> Character {
        let at = Utc.with_ymd_and_hms(2022, 3, 8, 11, 0, 0).unwrap();
        let mut character = Character::new(Identifier::parse(&"ab".repeat(20)).unwrap(), at);
        character.name = Some("Iris".into());
        character.intelligence = Some(250);
        character
    }

    #[test]
    fn test_character_shape() {
        let value = to_json(&sample_character()).unwrap();
        assert_eq!(value["identifier"], "ab".repeat(20));
        assert_eq!(value["name"], "Iris");
        assert_eq!(value["intelligence"], 250);
        assert_eq!(value["life"], Value::Null);
        assert_eq!(value["creation"], "2022-03-08T11:00:00+00:00");
    }

    #[test]
    fn test_serialization_is_idempotent() {
        let character = sample_character();
        let first = to_json(&character).unwrap().to_string();
        let second = to_json(&character).unwrap().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_collection_keeps_order() {
        let mut second = sample_character();
        second.identifier = Identifier::parse(&"cd".repeat(20)).unwrap();
        let value = to_json_collection(&[sample_character(), second]).unwrap();
        let ids: Vec<_> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["identifier"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["ab".repeat(20), "cd".repeat(20)]);
    }

    #[test]
    fn test_circular_reference_is_replaced_by_identifier() {
        let guild = Rc::new(Guild {
            identifier: "guild-a".to_string(),
            leader: OnceCell::new(),
        });
        let member = Rc::new(Member {
            identifier: "member-b".to_string(),
            guild: Rc::clone(&guild),
            tags: vec!["scribe".to_string()],
        });
        assert!(guild.leader.set(Rc::clone(&member)).is_ok());

        let value = to_json(&*guild).unwrap();
        assert_eq!(value["leader"]["identifier"], "member-b");
        assert_eq!(value["leader"]["guilds"][0], "guild-a");
        assert_eq!(value["leader"]["tags"][0], "scribe");

        let value = to_json(&*member).unwrap();
        assert_eq!(value["guilds"][0]["identifier"], "guild-a");
        assert_eq!(value["guilds"][0]["leader"], "member-b");
    }

    #[test]
    fn test_embedded_entity_is_not_a_cycle() {
        let banner = Banner {
            crest: Crest {
                identifier: "crest-1".to_string(),
            },
            motto: "Per aspera".to_string(),
        };
        // The crest sits at the banner's own address
        assert_eq!(
            &banner as *const Banner as *const (),
            &banner.crest as *const Crest as *const ()
        );

        let value = to_json(&banner).unwrap();
        assert!(value["crest"].is_object());
        assert_eq!(value["crest"]["identifier"], "crest-1");
        assert_eq!(value["motto"], "Per aspera");
    }

    #[test]
    fn test_non_finite_float_is_unrepresentable() {
        assert!(to_json(&Gauge(1.5)).is_ok());
        let err = to_json(&Gauge(f64::NAN)).unwrap_err();
        assert!(matches!(err, PipelineError::Serialization(_)));
    }
}
