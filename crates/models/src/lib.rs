pub mod errors;
pub mod db;
pub mod user_record;

#[cfg(test)]
mod tests;
