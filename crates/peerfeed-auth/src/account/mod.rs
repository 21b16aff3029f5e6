mod store;

pub use store::AccountStore;
