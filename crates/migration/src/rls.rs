//! Helpers for generating Row Level Security DDL
//!
//! sea-query has no vocabulary for policies, so these build the raw SQL that
//! migrations execute as statements. Policies are always dropped with
//! `IF EXISTS` before being recreated, which keeps re-applying a migration
//! safe and lets a policy definition change in place.

use std::fmt;

/// The SQL command type an RLS policy restricts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlsCommand {
    All,
    Select,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for RlsCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RlsCommand::All => write!(f, "ALL"),
            RlsCommand::Select => write!(f, "SELECT"),
            RlsCommand::Insert => write!(f, "INSERT"),
            RlsCommand::Update => write!(f, "UPDATE"),
            RlsCommand::Delete => write!(f, "DELETE"),
        }
    }
}

/// The target role for an RLS policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlsRole {
    Authenticated,
    Anon,
    ServiceRole,
    Public,
    Custom(String),
}

impl fmt::Display for RlsRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RlsRole::Authenticated => write!(f, "authenticated"),
            RlsRole::Anon => write!(f, "anon"),
            RlsRole::ServiceRole => write!(f, "service_role"),
            RlsRole::Public => write!(f, "public"),
            RlsRole::Custom(role) => write!(f, "\"{}\"", role),
        }
    }
}

/// A complete RLS policy definition
#[derive(Debug, Clone)]
pub struct RlsPolicy {
    /// Unique name for the policy
    pub name: String,
    /// The table this policy applies to
    pub table: String,
    /// The SQL command this policy restricts
    pub command: RlsCommand,
    /// The role this policy applies to
    pub role: RlsRole,
    /// SQL expression for the `USING` clause, deciding which existing rows
    /// are visible or modifiable. Must be None for INSERT policies, which
    /// only accept a check expression.
    pub using: Option<String>,
    /// SQL expression for the `WITH CHECK` clause, validating rows being
    /// inserted or updated
    pub check: Option<String>,
    /// The schema the table resides in; defaults to "public"
    pub schema: Option<String>,
}

impl RlsPolicy {
    /// An owner-scoped policy: the stored `user_id` must equal the caller's
    /// authenticated identity. This is the only policy shape the application
    /// uses. SELECT and DELETE get the predicate as USING, INSERT as
    /// WITH CHECK, UPDATE as both.
    pub fn owner(name: &str, table: &str, command: RlsCommand) -> Self {
        let predicate = "auth.uid() = user_id".to_string();
        let (using, check) = match command {
            RlsCommand::Insert => (None, Some(predicate)),
            RlsCommand::Update | RlsCommand::All => (Some(predicate.clone()), Some(predicate)),
            RlsCommand::Select | RlsCommand::Delete => (Some(predicate), None),
        };

        Self {
            name: name.to_string(),
            table: table.to_string(),
            command,
            role: RlsRole::Authenticated,
            using,
            check,
            schema: Some("public".to_string()),
        }
    }

    /// Generate the `CREATE POLICY` statement
    pub fn create_policy_sql(&self) -> String {
        let schema = self.schema.as_deref().unwrap_or("public");
        let using_clause = self
            .using
            .as_ref()
            .map_or(String::new(), |u| format!(" USING ({})", u));
        let check_clause = self
            .check
            .as_ref()
            .map_or(String::new(), |c| format!(" WITH CHECK ({})", c));

        format!(
            "CREATE POLICY \"{policy_name}\" ON \"{schema}\".\"{table_name}\" FOR {command} TO {role}{using_clause}{check_clause};",
            policy_name = self.name,
            schema = schema,
            table_name = self.table,
            command = self.command,
            role = self.role,
            using_clause = using_clause,
            check_clause = check_clause,
        )
    }

    /// Generate the `DROP POLICY IF EXISTS` statement
    pub fn drop_policy_sql(&self) -> String {
        let schema = self.schema.as_deref().unwrap_or("public");
        format!(
            "DROP POLICY IF EXISTS \"{policy_name}\" ON \"{schema}\".\"{table_name}\";",
            policy_name = self.name,
            schema = schema,
            table_name = self.table,
        )
    }
}

/// Generate the statement enabling RLS on a table
pub fn enable_rls_sql(table: &str, schema: Option<&str>) -> String {
    let schema = schema.unwrap_or("public");
    format!(
        "ALTER TABLE \"{schema}\".\"{table_name}\" ENABLE ROW LEVEL SECURITY;",
        schema = schema,
        table_name = table,
    )
}

/// Generate the statement disabling RLS on a table
pub fn disable_rls_sql(table: &str, schema: Option<&str>) -> String {
    let schema = schema.unwrap_or("public");
    format!(
        "ALTER TABLE \"{schema}\".\"{table_name}\" DISABLE ROW LEVEL SECURITY;",
        schema = schema,
        table_name = table,
    )
}
