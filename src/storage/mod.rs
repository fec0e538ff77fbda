pub mod gateway;
pub mod supabase;

pub use gateway::PersistenceGateway;
pub use supabase::SupabaseGateway;
