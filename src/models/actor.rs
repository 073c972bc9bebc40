use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

use crate::types::DbId;

/// A row from the `actors` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Actor {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
}

impl Actor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateActor {
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::name::en::{FirstName, LastName};
    use fake::Fake;

    #[test]
    fn full_name_joins_first_and_last() {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        let actor = Actor {
            id: 7,
            first_name: first.clone(),
            last_name: last.clone(),
        };
        assert_eq!(actor.full_name(), format!("{first} {last}"));
        assert_eq!(actor.to_string(), actor.full_name());
    }

    #[test]
    fn blank_last_name_is_rejected() {
        let input = CreateActor {
            first_name: "Ian".to_string(),
            last_name: String::new(),
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("last_name"));
    }
}
