//! Domain layer
//! 스토리 생성 규칙(엔티티/값 객체/정책)을 I/O 없이 표현한다.

pub mod completion;
pub mod demo;
pub mod error;
pub mod extract;
pub mod policy;
pub mod prompt;
pub mod quality;
pub mod story;
pub mod usage;
pub mod validate;
