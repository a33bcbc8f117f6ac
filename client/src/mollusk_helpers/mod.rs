use std::{
    collections::HashMap,
    path::PathBuf,
};

use mollusk_svm::{
    Mollusk,
    MolluskContext,
};
use solana_account::Account;
use solana_address::Address;

pub mod checks;
pub mod utils;

/// Converts an input deploy file to a program name used by the [`Mollusk::new`] function.
///
/// Requires the full file name; for example, `protector.so` would return the absolute path
/// version of `../target/deploy/protector`, which is exactly what [`Mollusk::new`] expects.
fn deploy_file_to_program_name(program_name: &str) -> String {
    PathBuf::from(env!("CARGO_WORKSPACE_DIR"))
        .join("target/deploy/")
        .join(program_name)
        .canonicalize()
        .map(|p| {
            p.to_str()
                .expect("Path should convert to a &str")
                .strip_suffix(".so")
                .expect("Deploy file should have an `.so` suffix")
                .to_string()
        })
        .expect("Should create relative target/deploy/ path")
}

/// Creates a [`Mollusk`] instance with the compiled `protector` program loaded.
pub fn new_protector_mollusk() -> Mollusk {
    Mollusk::new(
        &protector::ID.into(),
        &deploy_file_to_program_name("protector.so"),
    )
}

/// Creates and returns a [`MolluskContext`] with the `protector` program and the accounts passed.
pub fn new_protector_mollusk_context(
    accounts: Vec<(Address, Account)>,
) -> MolluskContext<HashMap<Address, Account>> {
    // Create mollusk context with the simple hashmap implementation for the AccountStore.
    let context = new_protector_mollusk().with_context(HashMap::new());

    for (address, account) in accounts {
        context.account_store.borrow_mut().insert(address, account);
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protector_program_path() {
        let protector = deploy_file_to_program_name("protector.so");
        assert!(protector.ends_with("protector"));

        // Ensure the program deploy path is a valid file.
        assert!(PathBuf::from([protector.as_str(), ".so"].concat()).is_file());
    }
}
