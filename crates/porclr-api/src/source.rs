//! The stack source seam between the API and the sync engine

use crate::client::PortainerClient;
use crate::types::{AuthToken, Stack, StackId};
use crate::Result;

/// Anything that can enumerate stacks and hand out their Compose content.
pub trait StackSource {
    /// List every stack, in the order the source returns them.
    fn list_stacks(&self) -> Result<Vec<Stack>>;

    /// Fetch the Compose file text for one stack.
    fn fetch_compose_file(&self, id: &StackId) -> Result<String>;
}

/// An authenticated view of a [`PortainerClient`].
///
/// Created by [`PortainerClient::login`]; the token is held only for the
/// lifetime of the session.
#[derive(Debug)]
pub struct Session<'a> {
    client: &'a PortainerClient,
    token: AuthToken,
}

impl<'a> Session<'a> {
    pub fn new(client: &'a PortainerClient, token: AuthToken) -> Self {
        Self { client, token }
    }
}

impl StackSource for Session<'_> {
    fn list_stacks(&self) -> Result<Vec<Stack>> {
        self.client.list_stacks(&self.token)
    }

    fn fetch_compose_file(&self, id: &StackId) -> Result<String> {
        self.client.fetch_compose_file(id, &self.token)
    }
}
