pub mod ddl;
pub mod holes;
pub mod rounds;
pub mod shots;
