//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - command: Command line tokenizing and confirmation answers
//! - file: File type classification and text detection
//! - formatting: Size, permission and hex dump formatting
//! - image: Image scaling and half-block text art
//! - navigation: Cursor, scroll and click calculations
//! - path: Virtual path normalization and joining

pub mod command;
pub mod file;
pub mod formatting;
pub mod image;
pub mod navigation;
pub mod path;
