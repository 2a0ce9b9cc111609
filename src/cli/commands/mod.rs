pub mod bill;
pub mod budget;
pub mod export;
pub mod goal;
pub mod investment;
pub mod settings;
pub mod summary;
pub mod system;
pub mod transaction;

use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    let definitions = system::definitions()
        .into_iter()
        .chain(summary::definitions())
        .chain(transaction::definitions())
        .chain(budget::definitions())
        .chain(goal::definitions())
        .chain(investment::definitions())
        .chain(bill::definitions())
        .chain(settings::definitions())
        .chain(export::definitions());
    for entry in definitions {
        registry.register(entry);
    }
}
