//! Assignment summary renderer.
//!
//! The hosted PDF service owns layout; behind the [`PdfRenderer`] trait this
//! module provides a plain-text summary renderer for development and tests.
//! In production, replace with the hosted renderer integration.

use roblesmun_core::environment::PdfRenderer;
use roblesmun_core::types::{Registration, SeatLabel};

/// Plain-text summary renderer (development stand-in).
#[derive(Debug, Clone, Default)]
pub struct PlainTextRenderer;

impl PdfRenderer for PlainTextRenderer {
    fn render(&self, registration: &Registration, assigned: &[SeatLabel]) -> Vec<u8> {
        let mut out = String::new();
        out.push_str("SEAT ASSIGNMENT SUMMARY\n");
        out.push_str("=======================\n\n");
        out.push_str(&format!("Registration: {}\n", registration.id));
        out.push_str(&format!("Requester:    {}\n", registration.full_name()));
        out.push_str(&format!("Institution:  {}\n", registration.institution));
        out.push_str(&format!("Email:        {}\n", registration.email));
        out.push_str(&format!(
            "Seats:        {} assigned of {} requested\n\n",
            assigned.len(),
            registration.seats
        ));
        for seat in assigned {
            out.push_str(&format!("  - {seat}\n"));
        }
        out.into_bytes()
    }
}
