pub mod cwa_client;
