//! Record fixtures shared by unit tests.

use crate::model::{decode, ModelError, Record};
use crate::relation::{Related, RelationDef};
use crate::validation::{On, Rule};
use crate::value::ValueType;
use sea_query::Value;

pub const SCHEMA: &str = "
    CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT, age INTEGER);
    CREATE TABLE posts (id INTEGER PRIMARY KEY AUTOINCREMENT, user_id INTEGER NOT NULL, name TEXT);
";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: Option<i32>,
}

impl Record for User {
    type PrimaryKey = i64;

    fn table_name() -> &'static str {
        "users"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "age"]
    }

    fn primary_key(&self) -> i64 {
        self.id
    }

    fn set_primary_key(&mut self, id: i64) {
        self.id = id;
    }

    fn get(&self, column: &str) -> Option<Value> {
        match column {
            "id" => Some(self.id.into_value()),
            "name" => Some(self.name.clone().into_value()),
            "age" => Some(self.age.into_value()),
            _ => None,
        }
    }

    fn set(&mut self, column: &str, value: Value) -> Result<(), ModelError> {
        match column {
            "id" => self.id = decode(column, value)?,
            "name" => self.name = decode(column, value)?,
            "age" => self.age = decode(column, value)?,
            _ => return Err(ModelError::ColumnNotFound(column.to_string())),
        }
        Ok(())
    }

    fn rules() -> Vec<(&'static str, Rule)> {
        vec![("name", Rule::new().presence())]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
}

impl Record for Post {
    type PrimaryKey = i64;

    fn table_name() -> &'static str {
        "posts"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "user_id", "name"]
    }

    fn primary_key(&self) -> i64 {
        self.id
    }

    fn set_primary_key(&mut self, id: i64) {
        self.id = id;
    }

    fn get(&self, column: &str) -> Option<Value> {
        match column {
            "id" => Some(self.id.into_value()),
            "user_id" => Some(self.user_id.into_value()),
            "name" => Some(self.name.clone().into_value()),
            _ => None,
        }
    }

    fn set(&mut self, column: &str, value: Value) -> Result<(), ModelError> {
        match column {
            "id" => self.id = decode(column, value)?,
            "user_id" => self.user_id = decode(column, value)?,
            "name" => self.name = decode(column, value)?,
            _ => return Err(ModelError::ColumnNotFound(column.to_string())),
        }
        Ok(())
    }

    fn rules() -> Vec<(&'static str, Rule)> {
        vec![
            ("name", Rule::new().presence()),
            ("name", Rule::new().length(4, 6).on(On::Create)),
            ("name", Rule::new().max_length(7).on(On::Update)),
        ]
    }
}

impl Related<Post> for User {
    fn to() -> RelationDef {
        RelationDef::has_many::<User, Post>("user_id")
    }
}

impl Related<User> for Post {
    fn to() -> RelationDef {
        RelationDef::belongs_to::<Post, User>("user_id")
    }
}
