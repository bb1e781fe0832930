//! The declaration buffer.
//!
//! Metadata declared with `desc`, `long_desc`, and `option` is staged here
//! until the next command is registered. Registration moves everything staged
//! into the new [`CommandSpec`] and leaves the buffer empty, so metadata never
//! leaks from one command onto the next.

use indexmap::IndexMap;

use herald_core::{CommandSpec, CommandTarget, OptionSpec, Param, RegistryError, RegistryResult};

/// Metadata staged for the next registered command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationBuffer {
    usage: Option<String>,
    description: Option<String>,
    long_description: Option<String>,
    options: IndexMap<String, OptionSpec>,
}

impl DeclarationBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages usage and description, replacing any unconsumed values.
    pub fn declare(&mut self, usage: impl Into<String>, description: impl Into<String>) {
        self.usage = Some(usage.into());
        self.description = Some(description.into());
    }

    /// Stages a long description.
    pub fn describe_long(&mut self, text: impl Into<String>) {
        self.long_description = Some(text.into());
    }

    /// Stages an option, replacing one of the same name.
    pub fn declare_option(&mut self, spec: OptionSpec) {
        self.options.insert(spec.name.clone(), spec);
    }

    /// Returns `true` if nothing has been staged since the last take.
    pub fn is_empty(&self) -> bool {
        self.usage.is_none()
            && self.description.is_none()
            && self.long_description.is_none()
            && self.options.is_empty()
    }

    /// Returns the staged usage string.
    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    /// Returns the staged options.
    pub fn options(&self) -> &IndexMap<String, OptionSpec> {
        &self.options
    }

    /// Moves the staged metadata into a new spec, leaving the buffer empty.
    ///
    /// Returns `Ok(None)` if nothing was staged. The buffer is cleared even
    /// when the staged options are rejected.
    pub fn take_spec(
        &mut self,
        name: &str,
        params: Vec<Param>,
        target: CommandTarget,
    ) -> RegistryResult<Option<CommandSpec>> {
        if self.is_empty() {
            return Ok(None);
        }

        let staged = std::mem::take(self);
        check_shorts(name, &staged.options)?;

        let mut spec = CommandSpec::new(name, target);
        spec.usage = staged.usage.unwrap_or_default();
        spec.description = staged.description.unwrap_or_default();
        spec.long_description = staged.long_description;
        spec.options = staged.options;
        spec.params = params;
        Ok(Some(spec))
    }
}

/// Rejects option sets in which two options share a short form.
fn check_shorts(command: &str, options: &IndexMap<String, OptionSpec>) -> RegistryResult<()> {
    let mut seen: Vec<&OptionSpec> = Vec::with_capacity(options.len());
    for option in options.values() {
        if let Some(first) = seen.iter().find(|o| o.short == option.short) {
            return Err(RegistryError::AmbiguousShort {
                command: command.to_string(),
                short: option.short,
                first: first.name.clone(),
                second: option.name.clone(),
            });
        }
        seen.push(option);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_yields_nothing() {
        let mut buffer = DeclarationBuffer::new();
        let spec = buffer
            .take_spec("helper", Vec::new(), CommandTarget::Unbound)
            .unwrap();
        assert!(spec.is_none());
    }

    #[test]
    fn test_take_moves_and_clears() {
        let mut buffer = DeclarationBuffer::new();
        buffer.declare("greet NAME", "say hello");
        buffer.describe_long("Greets NAME politely.");
        buffer.declare_option(OptionSpec::flag("loud"));

        let spec = buffer
            .take_spec("greet", vec![Param::required("NAME")], CommandTarget::Unbound)
            .unwrap()
            .unwrap();

        assert_eq!(spec.usage, "greet NAME");
        assert_eq!(spec.description, "say hello");
        assert_eq!(spec.long_description.as_deref(), Some("Greets NAME politely."));
        assert_eq!(spec.options.len(), 1);
        assert_eq!(spec.params, vec![Param::required("NAME")]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_declare_overwrites_unconsumed() {
        let mut buffer = DeclarationBuffer::new();
        buffer.declare("first", "one");
        buffer.declare("second", "two");
        assert_eq!(buffer.usage(), Some("second"));
    }

    #[test]
    fn test_option_alone_registers() {
        let mut buffer = DeclarationBuffer::new();
        buffer.declare_option(OptionSpec::flag("force"));
        let spec = buffer
            .take_spec("wipe", Vec::new(), CommandTarget::Unbound)
            .unwrap()
            .unwrap();
        assert!(spec.usage.is_empty());
        assert!(spec.has_options());
    }

    #[test]
    fn test_option_redeclared_replaces() {
        let mut buffer = DeclarationBuffer::new();
        buffer.declare_option(OptionSpec::text("output"));
        buffer.declare_option(OptionSpec::text("output").default_value("out.txt"));
        assert_eq!(buffer.options().len(), 1);
        assert!(buffer.options()["output"].default.is_some());
    }

    #[test]
    fn test_ambiguous_short_rejected_and_cleared() {
        let mut buffer = DeclarationBuffer::new();
        buffer.declare("build", "");
        buffer.declare_option(OptionSpec::flag("verbose"));
        buffer.declare_option(OptionSpec::text("version"));

        let err = buffer
            .take_spec("build", Vec::new(), CommandTarget::Unbound)
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::AmbiguousShort { short: 'v', .. }
        ));
        assert!(buffer.is_empty());
    }
}
