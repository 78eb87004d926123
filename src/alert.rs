//! Alert register: messages grouped by integer priority.
//!
//! Priorities are emitted in ascending order, messages within one priority in
//! the order they were added. Flushing observes the register without draining
//! it.

use crate::error::Result;
use std::collections::BTreeMap;
use std::io::Write;

/// Format one alert line as it is emitted by [`AlertRegister::flush`]
pub fn format_alert(priority: i32, message: &str) -> String {
    format!("[Priority {priority}]: {message}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertRegister {
    alerts: BTreeMap<i32, Vec<String>>,
}

impl AlertRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` under `priority`.
    pub fn add(&mut self, priority: i32, message: impl Into<String>) {
        self.alerts.entry(priority).or_default().push(message.into());
    }

    /// All alerts as `(priority, message)` in emission order
    pub fn iter(&self) -> impl Iterator<Item = (i32, &str)> {
        self.alerts.iter().flat_map(|(&priority, messages)| {
            messages
                .iter()
                .map(move |message| (priority, message.as_str()))
        })
    }

    /// Formatted alert lines, lowest priority value first.
    pub fn flush(&self) -> Vec<String> {
        self.iter()
            .map(|(priority, message)| format_alert(priority, message))
            .collect()
    }

    /// Write the flushed lines to `out`, one per line.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        for (priority, message) in self.iter() {
            writeln!(out, "{}", format_alert(priority, message))?;
        }
        Ok(())
    }

    /// Total number of messages across all priorities
    pub fn len(&self) -> usize {
        self.alerts.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn priorities(&self) -> impl Iterator<Item = i32> + '_ {
        self.alerts.keys().copied()
    }

    pub fn messages(&self, priority: i32) -> &[String] {
        self.alerts.get(&priority).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_alert_scenario() {
        let mut register = AlertRegister::new();
        register.add(1, "Critical failure in sensor 3!");
        register.add(2, "Maintenance required for sensor 5.");

        assert_eq!(
            register.flush(),
            vec![
                "[Priority 1]: Critical failure in sensor 3!",
                "[Priority 2]: Maintenance required for sensor 5.",
            ]
        );
    }

    #[test]
    fn test_priorities_ascend_and_messages_keep_insertion_order() {
        let mut register = AlertRegister::new();
        register.add(5, "e");
        register.add(-1, "neg");
        register.add(5, "f");
        register.add(2, "b");
        register.add(5, "e");

        assert_eq!(register.priorities().collect::<Vec<_>>(), vec![-1, 2, 5]);
        assert_eq!(register.messages(5), ["e", "f", "e"]);
        assert_eq!(register.len(), 5);
        assert_eq!(
            register.flush(),
            vec![
                "[Priority -1]: neg",
                "[Priority 2]: b",
                "[Priority 5]: e",
                "[Priority 5]: f",
                "[Priority 5]: e",
            ]
        );
    }

    #[test]
    fn test_flush_is_non_destructive() {
        let mut register = AlertRegister::new();
        register.add(3, "overheat");

        let first = register.flush();
        let second = register.flush();
        assert_eq!(first, second);
        assert_eq!(register.len(), 1);
    }

    #[test]
    fn test_empty_register() {
        let register = AlertRegister::new();
        assert!(register.is_empty());
        assert!(register.flush().is_empty());
        assert!(register.messages(1).is_empty());
        assert_eq!(register.priorities().count(), 0);
    }

    #[test]
    fn test_write_to() {
        let mut register = AlertRegister::new();
        register.add(2, "second");
        register.add(1, "first");

        let mut out = Vec::new();
        register.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[Priority 1]: first\n[Priority 2]: second\n"
        );
    }
}
