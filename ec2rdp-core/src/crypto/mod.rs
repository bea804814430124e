//! Password decryption
//!
//! EC2 encrypts the Windows administrator password with the public half of
//! the key pair chosen at instance launch, using RSA PKCS#1 v1.5. This
//! module performs the matching local decryption.

pub mod password;

pub use password::decrypt_password_data;
