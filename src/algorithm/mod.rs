//! Algorithm implementations for exposure data processing
//!
//! This module contains the harmonisation of questionnaire exposure codes
//! into analysis-ready exposure categories.

pub mod harmonization;
