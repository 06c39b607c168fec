/// The filter trait every chain step implements
pub mod filter;
