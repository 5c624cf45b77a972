use strum::IntoEnumIterator;

/// Every variant's string form joined with `, `, for error messages.
pub fn valid_csv<T: IntoEnumIterator + AsRef<str>>() -> String {
    let names: Vec<String> = T::iter().map(|v| v.as_ref().to_owned()).collect();
    names.join(", ")
}
