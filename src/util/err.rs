/// Converts an error of a submodule into its variant of
/// [`inkroute::Error`](crate::Error).
///
/// ```rust,ignore
/// use inkroute::extract::ExtractError;
/// inkroute::impl_err!(ExtractError, Extract);
/// ```
pub mod err_macro {
    #[macro_export]
    macro_rules! impl_err {
        ($from:ty, $variant:ident) => {
            impl From<$from> for $crate::Error {
                fn from(value: $from) -> Self {
                    $crate::Error::$variant(value)
                }
            }
        };
    }

    pub use impl_err;
}
