//! Application to stack lookup table
//!
//! `scan` identifies a compose file by the application (container name) it
//! declares and files it under the stack that application belongs to.

use std::collections::{BTreeMap, HashMap};

use crate::{Error, Result};

/// Maps an application identifier to the name of the stack that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackMap {
    by_app: HashMap<String, String>,
}

impl StackMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `stack -> [apps]` groups, as written in the config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmbiguousApp`] if one application is listed under two
    /// different stacks.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use porclr_core::StackMap;
    ///
    /// let mut groups = BTreeMap::new();
    /// groups.insert("rss-stack".to_string(), vec!["freshrss".to_string(), "mariadb".to_string()]);
    ///
    /// let map = StackMap::from_groups(&groups).unwrap();
    /// assert_eq!(map.stack_for("mariadb"), Some("rss-stack"));
    /// assert_eq!(map.stack_for("grafana"), None);
    /// ```
    pub fn from_groups(groups: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut map = Self::new();
        for (stack, apps) in groups {
            for app in apps {
                map.insert(app, stack)?;
            }
        }
        Ok(map)
    }

    /// Assign `app` to `stack`. Re-assigning to the same stack is a no-op.
    pub fn insert(&mut self, app: &str, stack: &str) -> Result<()> {
        match self.by_app.get(app) {
            Some(existing) if existing != stack => Err(Error::AmbiguousApp {
                app: app.to_string(),
                first: existing.clone(),
                second: stack.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                self.by_app.insert(app.to_string(), stack.to_string());
                Ok(())
            }
        }
    }

    pub fn stack_for(&self, app: &str) -> Option<&str> {
        self.by_app.get(app).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_app.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_app.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(stack, apps)| {
                (
                    stack.to_string(),
                    apps.iter().map(|a| a.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn lookup_by_app() {
        let map = StackMap::from_groups(&groups(&[
            ("network-stack", &["duckdns", "pihole-unbound"]),
            ("home-stack", &["grocy"]),
        ]))
        .unwrap();

        assert_eq!(map.len(), 3);
        assert_eq!(map.stack_for("pihole-unbound"), Some("network-stack"));
        assert_eq!(map.stack_for("grocy"), Some("home-stack"));
        assert_eq!(map.stack_for("heimdall"), None);
    }

    #[test]
    fn app_in_two_stacks_is_rejected() {
        let result = StackMap::from_groups(&groups(&[
            ("grafana-stack", &["influxdb"]),
            ("rss-stack", &["influxdb"]),
        ]));

        assert!(matches!(result, Err(Error::AmbiguousApp { app, .. }) if app == "influxdb"));
    }

    #[test]
    fn duplicate_within_one_stack_is_fine() {
        let map = StackMap::from_groups(&groups(&[("test-stack", &["alpine", "alpine"])])).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn empty_map() {
        let map = StackMap::new();
        assert!(map.is_empty());
        assert_eq!(map.stack_for("anything"), None);
    }
}
