//! Example: Render a short arrangement and print its schedule as JSON
//!
//! Run with `RUST_LOG=barline_player=debug` to see the per-bar trace.

use barline_core::Distribution;
use barline_core::{
    step_add, End, Event, LinearDistribution, LinearTempoChange, Measure, Mix, Params, Pattern,
    RandomPattern, SeqSwitch, Sequence, SlotPattern, TempoSpan, Voice,
};
use barline_player::{Track, TrackConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn drums(kick: &Voice, snare: &Voice) -> anyhow::Result<SlotPattern> {
    let hit = |voice: &Voice, amp: f64| Event::on(voice, Params::new().with("amp", amp));
    Ok(SlotPattern::new(&[1.0, 1.0, 1.0, 1.0])?.set_events([
        Some(hit(kick, 1.0)),
        Some(hit(snare, 0.8)),
        Some(hit(kick, 0.9)),
        Some(hit(snare, 0.8)),
    ]))
}

fn bass(voice: &Voice, root: f64) -> anyhow::Result<SlotPattern> {
    let note = |freq: f64| Event::on(voice, Params::new().with("freq", freq));
    Ok(SlotPattern::new(&[3.0, 1.0, 2.0, 2.0])?.set_events([
        Some(note(root)),
        None,
        Some(note(root * 1.5)),
        Some(note(root * 2.0)),
    ]))
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let kick = Voice::new("kick");
    let snare = Voice::new("snare");
    let sub = Voice::new("sub");

    // intro: drums only, every other bar gated off, tempo climbing
    let climb = TempoSpan::new(96.0, 4.0, step_add);
    let intro = Mix::new(vec![
        SeqSwitch::new(Some(drums(&kick, &snare)?.boxed()), vec![true, false])?.boxed(),
        climb.set_tempo("0")?.boxed(),
    ]);
    let intro = Sequence::new(vec![intro.boxed(), intro_tail(&climb)?.boxed()])?;

    // verse: drums with one of two bass lines and a filter sweep
    let sweep = LinearDistribution::new("cutoff", 200.0, 2000.0, 8, Measure::BAR)?;
    let verse = Mix::new(vec![
        drums(&kick, &snare)?.boxed(),
        RandomPattern::with_seed(vec![bass(&sub, 55.0)?.boxed(), bass(&sub, 41.2)?.boxed()], 7)?
            .boxed(),
        sweep.modify_voice("0", &sub)?.boxed(),
    ]);

    // outro: slow down over the bar and stop halfway through the next one
    let slow = LinearTempoChange::new(112.0, 80.0, 4, Measure::BAR)?;
    let outro = Sequence::new(vec![slow.modify_tempo("0")?.boxed(), End::new("1/2")?.boxed()])?;

    let mut song = Sequence::new(vec![
        intro.boxed(),
        verse.boxed(),
        verse_again(&kick, &snare)?.boxed(),
        outro.boxed(),
    ])?;

    let mut track = Track::new(TrackConfig {
        bar: "1".to_string(),
        tempo: 96.0,
        ..TrackConfig::default()
    })?;
    let schedule = track.render(&mut song)?;

    eprintln!(
        "Rendered {} bars, {} events, final tempo {:.1} BPM{}",
        schedule.len(),
        schedule.event_count(),
        track.tempo(),
        if schedule.ended { " (end marker)" } else { "" }
    );
    println!("{}", schedule.to_json_pretty()?);

    Ok(())
}

fn intro_tail(climb: &TempoSpan) -> anyhow::Result<Mix> {
    Ok(Mix::new(vec![climb.set_tempo("0")?.boxed(), climb.set_tempo("1/2")?.boxed()]))
}

fn verse_again(kick: &Voice, snare: &Voice) -> anyhow::Result<Mix> {
    let mut fill = drums(kick, snare)?;
    fill.change_all_events(|_, events| {
        for params in events.iter_mut().filter_map(Event::params_mut) {
            params.set("amp", 1.0);
        }
    });
    Ok(Mix::new(vec![fill.boxed()]))
}
