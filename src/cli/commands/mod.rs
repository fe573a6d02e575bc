mod backups;
mod budget;
mod system;
mod transaction;

use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(transaction::definitions())
        .chain(budget::definitions())
        .chain(backups::definitions())
    {
        registry.register(entry);
    }
}
