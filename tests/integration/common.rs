//! Shared record types and schema for the integration suite.

use activerow::{
    decode, ActiveRecord, ModelError, Numericality, On, Params, Record, Related, RelationDef, Rule, Select,
    Value, ValueType,
};
use activerow::test_helpers::TestDatabase;
use activerow::Errors;
use regex::Regex;

pub const SCHEMA: &str = "
    CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT,
        age INTEGER
    );
    CREATE TABLE posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        title TEXT NOT NULL
    );
    CREATE TABLE tags (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE ON CONFLICT IGNORE
    );
";

pub fn setup() -> TestDatabase {
    TestDatabase::with_schema(SCHEMA).expect("schema applies")
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl Record for User {
    type PrimaryKey = i64;

    fn table_name() -> &'static str {
        "users"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "email", "age"]
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
            "email" => Some(self.email.clone().into_value()),
            "age" => Some(self.age.into_value()),
            _ => None,
        }
    }

    fn set(&mut self, column: &str, value: Value) -> Result<(), ModelError> {
        match column {
            "id" => self.id = decode(column, value)?,
            "name" => self.name = decode(column, value)?,
            "email" => self.email = decode(column, value)?,
            "age" => self.age = decode(column, value)?,
            _ => return Err(ModelError::ColumnNotFound(column.to_string())),
        }
        Ok(())
    }

    fn rules() -> Vec<(&'static str, Rule)> {
        vec![
            ("name", Rule::new().presence()),
            ("email", Rule::new().format(Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid regex"))),
            (
                "age",
                Rule::new().numericality(Numericality::new().only_integer().greater_than_or_equal_to(0.0)),
            ),
        ]
    }

    fn validate_custom(&self, errors: &mut Errors) {
        if self.name == "admin" {
            errors.add("name", "is reserved");
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
}

impl Record for Post {
    type PrimaryKey = i64;

    fn table_name() -> &'static str {
        "posts"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "user_id", "title"]
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
            "title" => Some(self.title.clone().into_value()),
            _ => None,
        }
    }

    fn set(&mut self, column: &str, value: Value) -> Result<(), ModelError> {
        match column {
            "id" => self.id = decode(column, value)?,
            "user_id" => self.user_id = decode(column, value)?,
            "title" => self.title = decode(column, value)?,
            _ => return Err(ModelError::ColumnNotFound(column.to_string())),
        }
        Ok(())
    }

    fn rules() -> Vec<(&'static str, Rule)> {
        vec![
            ("title", Rule::new().presence()),
            ("title", Rule::new().length(4, 6).on(On::Create)),
            ("title", Rule::new().max_length(7).on(On::Update)),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

impl Record for Tag {
    type PrimaryKey = i64;

    fn table_name() -> &'static str {
        "tags"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name"]
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
            _ => None,
        }
    }

    fn set(&mut self, column: &str, value: Value) -> Result<(), ModelError> {
        match column {
            "id" => self.id = decode(column, value)?,
            "name" => self.name = decode(column, value)?,
            _ => return Err(ModelError::ColumnNotFound(column.to_string())),
        }
        Ok(())
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

/// Reusable query fragments for users
pub trait UserScopes {
    fn older_than(self, age: i32) -> Self;
}

impl UserScopes for Select<User> {
    fn older_than(self, age: i32) -> Self {
        self.filter("age >", age)
    }
}

/// Insert a valid user, panicking on failure
pub fn create_user(db: &TestDatabase, name: &str, age: Option<i32>) -> User {
    let mut params = Params::new().set("name", name);
    if let Some(age) = age {
        params = params.set("age", age);
    }
    let (user, result) = User::create(&**db, params);
    result.expect("user saves");
    user
}
