pub mod account;
pub mod memory;
pub mod task;

pub use account::PostgresAccountRepository;
pub use memory::InMemoryAccountRepository;
pub use memory::InMemoryTaskRepository;
pub use task::PostgresTaskRepository;
