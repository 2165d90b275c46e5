#![allow(dead_code)]

use vmrp_stego::{Carrier, ChapterRecord, FlagState, Flags};

pub fn kira_05() -> ChapterRecord {
    ChapterRecord::new(
        5,
        "Kira",
        Flags::new(FlagState::Latent, FlagState::Latent, FlagState::Active),
        ["⟣B05-1", "⟣B05-2", "⟣B05-3"],
        "frontend/chapter05.html",
        "Kira – Chapter 05",
        "2024-01-01T00:00:00Z",
    )
    .expect("scenario record should be valid")
}

/// Deterministic pseudo-random RGB pixels (xorshift32).
pub fn noise_carrier(width: u32, height: u32, seed: u32) -> Carrier {
    let mut state = seed.max(1);
    let len = width as usize * height as usize * 3;
    let data = (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    Carrier::from_raw(width, height, vmrp_carrier::PixelLayout::Rgb, data)
        .expect("noise carrier should be valid")
}
