//! Field schemas binding the domain entities to the pipeline

use crate::domain::entities::{Character, Player};

use super::{FieldInput, FieldKind, Hydratable, Node, Normalize};

impl Hydratable for Character {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("kind", FieldKind::Text),
        ("name", FieldKind::Text),
        ("surname", FieldKind::Text),
        ("caste", FieldKind::Text),
        ("knowledge", FieldKind::Text),
        ("intelligence", FieldKind::Integer),
        ("life", FieldKind::Integer),
        ("image", FieldKind::Text),
    ];

    fn assign(&mut self, field: &str, input: FieldInput) -> Result<(), String> {
        match field {
            "kind" => self.kind = input.into_text()?,
            "name" => self.name = input.into_text()?,
            "surname" => self.surname = input.into_text()?,
            "caste" => self.caste = input.into_text()?,
            "knowledge" => self.knowledge = input.into_text()?,
            "intelligence" => self.intelligence = input.into_integer()?,
            "life" => self.life = input.into_integer()?,
            "image" => self.image = input.into_text()?,
            other => return Err(format!("Unknown character field '{other}'")),
        }
        Ok(())
    }
}

impl Normalize for Character {
    fn identifier(&self) -> Option<&str> {
        Some(self.identifier.as_str())
    }

    fn normalize(&self) -> Vec<(&'static str, Node<'_>)> {
        vec![
            ("identifier", Node::Text(self.identifier.as_str())),
            ("kind", Node::text(&self.kind)),
            ("name", Node::text(&self.name)),
            ("surname", Node::text(&self.surname)),
            ("caste", Node::text(&self.caste)),
            ("knowledge", Node::text(&self.knowledge)),
            ("intelligence", Node::integer(self.intelligence)),
            ("life", Node::integer(self.life)),
            ("image", Node::text(&self.image)),
            ("creation", Node::DateTime(self.creation)),
            ("modification", Node::DateTime(self.modification)),
        ]
    }
}

impl Hydratable for Player {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("firstname", FieldKind::Text),
        ("lastname", FieldKind::Text),
        ("email", FieldKind::Text),
        ("mirian", FieldKind::Integer),
    ];

    fn assign(&mut self, field: &str, input: FieldInput) -> Result<(), String> {
        match field {
            "firstname" => self.firstname = input.into_text()?,
            "lastname" => self.lastname = input.into_text()?,
            "email" => self.email = input.into_text()?,
            "mirian" => self.mirian = input.into_integer()?,
            other => return Err(format!("Unknown player field '{other}'")),
        }
        Ok(())
    }
}

impl Normalize for Player {
    fn identifier(&self) -> Option<&str> {
        Some(self.identifier.as_str())
    }

    fn normalize(&self) -> Vec<(&'static str, Node<'_>)> {
        vec![
            ("identifier", Node::Text(self.identifier.as_str())),
            ("firstname", Node::text(&self.firstname)),
            ("lastname", Node::text(&self.lastname)),
            ("email", Node::text(&self.email)),
            ("mirian", Node::integer(self.mirian)),
            ("creation_date", Node::DateTime(self.creation_date)),
            ("modification", Node::DateTime(self.modification)),
        ]
    }
}
