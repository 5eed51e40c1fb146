//! Predicate model shared by read relations and mutation statements.
//!
//! A predicate is a SQL fragment plus the values bound to its placeholders. The
//! fragment a caller passes is completed with placeholders according to its shape:
//!
//! | fragment            | values | rendered                 |
//! |---------------------|--------|--------------------------|
//! | `name`              | 1      | `name = ?`               |
//! | `age >`             | 1      | `age > ?`                |
//! | `name LIKE`         | 1      | `name LIKE ?`            |
//! | `id IN`             | 3      | `id IN (?, ?, ?)`        |
//! | `id`                | 3      | `id IN (?, ?, ?)`        |
//! | `age > ? AND age < ?` | 2    | used verbatim            |
//! | `age IS NULL`       | 0      | used verbatim            |

use sea_query::Value;

/// How a predicate joins the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    pub fn as_sql(self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

/// One rendered predicate and its bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub connector: Connector,
    pub sql: String,
    pub args: Vec<Value>,
}

impl Condition {
    pub fn new(connector: Connector, fragment: &str, args: Vec<Value>) -> Self {
        let sql = render_fragment(fragment, args.len());
        let sql = if has_top_level_or(&sql) {
            format!("({sql})")
        } else {
            sql
        };
        Self {
            connector,
            sql,
            args,
        }
    }
}

const SYMBOL_OPERATORS: [&str; 3] = ["=", "<", ">"];
const WORD_OPERATORS: [&str; 5] = [" LIKE", " IS", " IS NOT", " GLOB", " REGEXP"];

/// Complete `fragment` with placeholders for `arg_count` values.
pub fn render_fragment(fragment: &str, arg_count: usize) -> String {
    let fragment = fragment.trim();
    let upper = fragment.to_ascii_uppercase();
    let ends_with_in = upper.ends_with(" IN") || upper == "IN";

    if ends_with_in && arg_count == 0 {
        // An empty list matches nothing, and NOT IN of nothing matches everything
        return if upper.ends_with(" NOT IN") {
            "1 = 1".to_string()
        } else {
            "1 = 0".to_string()
        };
    }
    if arg_count == 0 || fragment.contains('?') {
        return fragment.to_string();
    }
    if ends_with_in {
        return format!("{fragment} ({})", placeholders(arg_count));
    }
    if arg_count > 1 {
        return format!("{fragment} IN ({})", placeholders(arg_count));
    }
    let has_operator = SYMBOL_OPERATORS.iter().any(|op| upper.ends_with(op))
        || WORD_OPERATORS.iter().any(|op| upper.ends_with(op));
    if has_operator {
        format!("{fragment} ?")
    } else {
        format!("{fragment} = ?")
    }
}

/// `?, ?, ?`
pub fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Join `conditions` after `keyword` (`WHERE`, `HAVING`), appending their values.
pub fn render_conditions(keyword: &str, conditions: &[Condition], sql: &mut String, args: &mut Vec<Value>) {
    if conditions.is_empty() {
        return;
    }
    sql.push(' ');
    sql.push_str(keyword);
    for (i, cond) in conditions.iter().enumerate() {
        sql.push(' ');
        if i > 0 {
            sql.push_str(cond.connector.as_sql());
            sql.push(' ');
        }
        sql.push_str(&cond.sql);
        args.extend(cond.args.iter().cloned());
    }
}

/// An ` OR ` outside parentheses and string literals.
fn has_top_level_or(sql: &str) -> bool {
    let upper = sql.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    let mut depth = 0i32;
    let mut in_quote = false;
    for (i, b) in bytes.iter().enumerate() {
        match b {
            b'\'' => in_quote = !in_quote,
            b'(' if !in_quote => depth += 1,
            b')' if !in_quote => depth -= 1,
            b' ' if !in_quote && depth == 0 && upper[i..].starts_with(" OR ") => return true,
            _ => {}
        }
    }
    false
}
