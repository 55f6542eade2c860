use super::definition::SpecSnapshot;
use crate::error::SpecConversionError;

/// A trait for custom data models that can be converted into a `SpecSnapshot`.
///
/// The specification language itself is parsed elsewhere. Implementing this
/// trait on the parser's output structs is the translation layer that lets
/// the graph builder consume it.
///
/// # Example
///
/// ```rust,no_run
/// use nagare::prelude::*;
/// use nagare::error::SpecConversionError;
///
/// struct MyScreen { name: String, buttons: Vec<String> }
/// struct MyApp { screens: Vec<MyScreen>, links: Vec<(String, String, String)> }
///
/// impl IntoSpec for MyApp {
///     fn into_spec(self) -> std::result::Result<SpecSnapshot, SpecConversionError> {
///         let mut snapshot = SpecSnapshot::new();
///         for screen in &self.screens {
///             let actions: Vec<&str> = screen.buttons.iter().map(String::as_str).collect();
///             snapshot = snapshot.screen(&screen.name.to_lowercase(), &screen.name, None, &actions);
///         }
///         for (from, trigger, to) in &self.links {
///             snapshot = snapshot.transition(from, trigger, to);
///         }
///         Ok(snapshot)
///     }
/// }
/// ```
pub trait IntoSpec {
    /// Consumes the object and converts it into a specification snapshot.
    fn into_spec(self) -> Result<SpecSnapshot, SpecConversionError>;
}

impl IntoSpec for SpecSnapshot {
    fn into_spec(self) -> Result<SpecSnapshot, SpecConversionError> {
        Ok(self)
    }
}
