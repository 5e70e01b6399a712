//! Human-readable type names for diagnostics and monitoring.

/// Strip the module path from a `std::any::type_name` result.
///
/// Generic arguments keep their own paths; only the outermost prefix is
/// removed (`a::b::Foo<c::Bar>` → `Foo<c::Bar>`).
pub fn short_type_name(full: &'static str) -> &'static str {
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}
