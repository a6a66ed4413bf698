pub mod bus;
pub mod csr;
pub mod device;
