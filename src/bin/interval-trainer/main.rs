//! interval-trainer - terminal ear-training front end
//!
//! Run with: cargo run -- --preset normal --mode melodic

mod app;
mod output;
mod ui;

use clap::{Parser, ValueEnum};
use simple_logger::SimpleLogger;

use app::App;
use interval_trainer::{
    practice::{DirectionSetting, MaxRange, NoteLength, PracticeConfiguration, TrainingMode},
    random, Preset, PracticeSession, TonePlayer,
};
use output::Output;

#[derive(Debug, Parser)]
#[command(name = "interval-trainer", version, about = "Hear two notes, name the interval")]
struct Args {
    /// Interval set to practise
    #[arg(long, value_enum, default_value_t = PresetArg::Normal)]
    preset: PresetArg,

    /// Play the notes one after another or together
    #[arg(long, value_enum, default_value_t = ModeArg::Melodic)]
    mode: ModeArg,

    /// Direction of melodic rounds
    #[arg(long, value_enum, default_value_t = DirectionArg::Random)]
    direction: DirectionArg,

    /// Widest distance between the two notes, in octaves
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2), default_value_t = 1)]
    range: u8,

    /// Length of each note
    #[arg(long, value_enum, default_value_t = LengthArg::Short)]
    length: LengthArg,

    /// Seed for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the correct/incorrect chimes
    #[arg(long)]
    no_sfx: bool,

    /// Render audio in memory instead of opening an output device
    #[arg(long)]
    dry_run: bool,

    /// Log level (logs go to stderr, which the UI shares)
    #[arg(long, default_value = "off")]
    log_level: log::LevelFilter,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    Easy,
    Normal,
    Hard,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Melodic,
    Harmony,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionArg {
    Ascending,
    Descending,
    Random,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LengthArg {
    Short,
    Medium,
    Long,
}

impl Args {
    fn configuration(&self) -> PracticeConfiguration {
        let preset = match self.preset {
            PresetArg::Easy => Preset::Beginner,
            PresetArg::Normal => Preset::Basic,
            PresetArg::Hard => Preset::JazzIntro,
        };
        let mode = match self.mode {
            ModeArg::Melodic => TrainingMode::Melodic,
            ModeArg::Harmony => TrainingMode::Harmony,
        };
        let direction = match self.direction {
            DirectionArg::Ascending => DirectionSetting::Ascending,
            DirectionArg::Descending => DirectionSetting::Descending,
            DirectionArg::Random => DirectionSetting::Random,
        };
        let length = match self.length {
            LengthArg::Short => NoteLength::Short,
            LengthArg::Medium => NoteLength::Medium,
            LengthArg::Long => NoteLength::Long,
        };
        let range = if self.range == 2 {
            MaxRange::TwoOctaves
        } else {
            MaxRange::OneOctave
        };

        PracticeConfiguration::new()
            .preset(preset)
            .mode(mode)
            .direction(direction)
            .note_length(length)
            .max_range(range)
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    SimpleLogger::new().with_level(args.log_level).init()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("practice seed {seed}");

    let output = if args.dry_run {
        Output::dry_run()
    } else {
        Output::device()
    };
    let player = TonePlayer::new(output).with_sound_effects(!args.no_sfx);
    let session = PracticeSession::new(args.configuration(), random::seeded(seed));

    let mut app = App::new(session, player, seed);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
