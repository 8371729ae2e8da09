//! Policies command implementation.

use pcrb::policy::BUILTIN_POLICIES;

/// Print the built-in policies, one per line.
pub(crate) fn execute() {
    println!("Built-in policies:");
    for (name, description) in BUILTIN_POLICIES {
        println!("  {name:<10} {description}");
    }
}
