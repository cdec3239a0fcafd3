//! The application operations layer: folders, questions and contributions
//!
//! One `Notes` handle is created per authenticated session. Every operation
//! runs under that session's token, so the database's owner policies scope
//! reads and writes to the caller; `user_id` is still set explicitly on
//! inserts for clarity.

mod contributions;
mod folders;
mod models;
mod questions;

pub use models::*;

use crate::auth::Session;
use crate::db::{RpcClient, TableClient};
use crate::Qfolders;

/// Folder, question and contribution operations for one authenticated user
pub struct Notes<'a> {
    client: &'a Qfolders,
    session: Session,
}

impl<'a> Notes<'a> {
    pub(crate) fn new(client: &'a Qfolders, session: Session) -> Self {
        Self { client, session }
    }

    /// The session this handle operates under
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn table(&self, name: &str) -> TableClient {
        self.client.from(name, &self.session)
    }

    fn rpc(&self) -> RpcClient {
        self.client.rpc(&self.session)
    }
}
