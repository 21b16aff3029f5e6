mod store;

pub use store::PendingAccountStore;
