/// Shallow configuration override shared by every overlay widget.
///
/// `override_with` returns the base configuration with every key present in
/// the patch replaced by the patch's value; keys absent from the patch keep
/// the base value. Nested structures (margins) are replaced wholesale, never
/// deep-merged. No side effects; invoked on every `set_config` call.
pub trait ConfigOverride: Sized {
    type Patch: Default;

    #[must_use]
    fn override_with(self, patch: Self::Patch) -> Self;
}
