#![allow(dead_code)]

use rand::Rng;
use rand_pcg::Lcg64Xsh32;
use ser_tag::{Record, WideString};

/// Deterministic generator so failures reproduce.
pub fn rng() -> Lcg64Xsh32 {
	Lcg64Xsh32::new(0xcafef00dd15ea5e5, 0x0a02bdbf7bb3c0a7)
}

pub trait Generate {
	fn generate<R: Rng>(rng: &mut R) -> Self;
}

#[derive(Record, Clone, Debug, Default, PartialEq)]
pub struct Stats {
	#[tag(0)]
	pub level: u16,
	#[tag(1)]
	pub experience: u64,
	#[tag(4)]
	pub stamina: f32,
}

impl Generate for Stats {
	fn generate<R: Rng>(rng: &mut R) -> Self {
		Self {
			level: rng.gen_range(1..=99),
			experience: rng.gen(),
			stamina: rng.gen_range(0.0..100.0),
		}
	}
}

#[derive(Record, Clone, Debug, Default, PartialEq)]
pub struct Profile {
	#[tag(0)]
	pub id: u64,
	#[tag(1)]
	pub name: String,
	#[tag(3)]
	pub motto: WideString,
	#[record(4)]
	pub stats: Stats,
	#[tag(7)]
	pub unlocked: Vec<(u32, String)>,
	#[tag(9)]
	pub position: (f32, f32, f32),
	#[tag(12)]
	pub hardcore: bool,
}

impl Generate for Profile {
	fn generate<R: Rng>(rng: &mut R) -> Self {
		const NAMES: [&str; 8] = [
			"dagny", "frisco", "ragnar", "eddie", "hank", "owen", "ken", "hugh",
		];
		const MOTTOS: [&str; 4] = ["never yield", "に登る", "🜚 aurum", "par excellence"];

		let unlocked = (0..rng.gen_range(0..6))
			.map(|_| {
				let achievement = rng.gen_range(0..1000u32);
				(achievement, format!("achievement-{achievement}"))
			})
			.collect();

		Self {
			id: rng.gen(),
			name: NAMES[rng.gen_range(0..NAMES.len())].to_owned(),
			motto: WideString::from(MOTTOS[rng.gen_range(0..MOTTOS.len())]),
			stats: Stats::generate(rng),
			unlocked,
			position: (rng.gen(), rng.gen(), rng.gen()),
			hardcore: rng.gen(),
		}
	}
}

/// The same schema as [`Profile`] as an older revision would have declared
/// it: identifiers match, later additions are absent.
#[derive(Record, Clone, Debug, Default, PartialEq)]
pub struct ProfileV0 {
	#[tag(0)]
	pub id: u64,
	#[tag(1)]
	pub name: String,
	#[tag(9)]
	pub position: (f32, f32, f32),
}
