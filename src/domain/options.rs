//! # Option Resolver
//!
//! Read-only lookups over the options a caller supplied to a chat-input command.

use crate::domain::types::{InteractionOption, OptionKind, OptionValue};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionResolver {
    data: Vec<InteractionOption>,
}

impl OptionResolver {
    pub fn new(data: Vec<InteractionOption>) -> Self {
        Self { data }
    }

    /// The raw top-level option list.
    pub fn data(&self) -> &[InteractionOption] {
        &self.data
    }

    /// Name of the chosen subcommand, if the invocation selected one. Subcommands
    /// inside a group are found too; the group name comes from `subcommand_group`.
    pub fn subcommand(&self) -> Option<&str> {
        self.chosen_subcommand().map(|o| o.name.as_str())
    }

    pub fn subcommand_group(&self) -> Option<&str> {
        self.data
            .iter()
            .find(|o| o.kind == OptionKind::SubCommandGroup)
            .map(|o| o.name.as_str())
    }

    /// Looks an option up by name, descending into a chosen subcommand.
    pub fn get(&self, name: &str) -> Option<&InteractionOption> {
        self.leaf_options().find(|o| o.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&OptionValue> {
        self.get(name).and_then(|o| o.value.as_ref())
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.value(name)? {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.value(name)? {
            OptionValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.value(name)? {
            OptionValue::Number(n) => Some(*n),
            OptionValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.value(name)? {
            OptionValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    fn chosen_subcommand(&self) -> Option<&InteractionOption> {
        self.data.iter().find_map(|o| match o.kind {
            OptionKind::SubCommand => Some(o),
            OptionKind::SubCommandGroup => {
                o.options.iter().find(|s| s.kind == OptionKind::SubCommand)
            }
            _ => None,
        })
    }

    /// Top-level options, or the chosen subcommand's own options when there is one.
    fn leaf_options(&self) -> impl Iterator<Item = &InteractionOption> {
        let leaves: &[InteractionOption] = match self.chosen_subcommand() {
            Some(sub) => &sub.options,
            None => &self.data,
        };
        leaves.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(name: &str, kind: OptionKind, value: Option<OptionValue>) -> InteractionOption {
        InteractionOption {
            name: name.to_string(),
            kind,
            value,
            options: Vec::new(),
        }
    }

    #[test]
    fn test_subcommand_and_nested_lookup() {
        let mut set = opt("set", OptionKind::SubCommand, None);
        set.options.push(opt(
            "key",
            OptionKind::String,
            Some(OptionValue::String("lang".into())),
        ));
        set.options.push(opt("enabled", OptionKind::Boolean, Some(OptionValue::Boolean(false))));
        let resolver = OptionResolver::new(vec![set]);

        assert_eq!(resolver.subcommand(), Some("set"));
        assert_eq!(resolver.string("key"), Some("lang"));
        assert_eq!(resolver.boolean("enabled"), Some(false));
        assert_eq!(resolver.integer("key"), None);
        assert!(resolver.get("missing").is_none());
    }

    #[test]
    fn test_subcommand_inside_group() {
        let mut set = opt("set", OptionKind::SubCommand, None);
        set.options.push(opt("level", OptionKind::Integer, Some(OptionValue::Integer(2))));
        let mut group = opt("logging", OptionKind::SubCommandGroup, None);
        group.options.push(set);
        let resolver = OptionResolver::new(vec![group]);

        assert_eq!(resolver.subcommand_group(), Some("logging"));
        assert_eq!(resolver.subcommand(), Some("set"));
        assert_eq!(resolver.integer("level"), Some(2));
        assert!(resolver.get("set").is_none());
    }

    #[test]
    fn test_no_subcommand() {
        let resolver = OptionResolver::new(vec![opt(
            "amount",
            OptionKind::Integer,
            Some(OptionValue::Integer(3)),
        )]);
        assert_eq!(resolver.subcommand(), None);
        assert_eq!(resolver.integer("amount"), Some(3));
        assert_eq!(resolver.number("amount"), Some(3.0));
    }
}
