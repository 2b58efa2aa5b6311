//! # ff testkit
//!
//! Testing utilities for ff.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fixed inputs with the exact signature and message id
//!   they must produce
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Throwaway storage roots with a deterministic identity
//!
//! ## Golden Vectors
//!
//! ```rust
//! use ff_testkit::vectors::{all_vectors, message_from_vector};
//!
//! for vector in all_vectors() {
//!     let msg = message_from_vector(&vector).unwrap();
//!     assert_eq!(msg.id().unwrap().to_string(), vector.expected_message_id);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use ff_testkit::generators::{message_from_params, MessageParams};
//!
//! proptest! {
//!     #[test]
//!     fn message_id_is_deterministic(params: MessageParams) {
//!         let a = message_from_params(&params);
//!         let b = message_from_params(&params);
//!         prop_assert_eq!(a.id().unwrap(), b.id().unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use ff_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_seed([0x42; 32]);
//! let msg = fixture.chain().append_post("hello").unwrap();
//! assert_eq!(msg.sequence(), 1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{message_from_params, MessageParams};
pub use vectors::{all_vectors, message_from_vector, verify_all_vectors, GoldenVector};
