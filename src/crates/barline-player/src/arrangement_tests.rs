// Whole arrangements rendered from bar 0 to their end marker

#[cfg(test)]
mod tests {
    use barline_core::{
        step_multiply, Distribution, End, Event, ExponentialDistribution, Mix, Params, Pattern,
        RandomPattern, SeqSwitch, Sequence, SlotPattern, TempoSpan, Voice,
    };
    use crate::{Measure, Track, TrackConfig};

    fn riff(voice: &Voice) -> anyhow::Result<SlotPattern> {
        let note = |freq: f64| Event::on(voice, Params::new().with("freq", freq));
        Ok(SlotPattern::new(&[2.0, 1.0, 1.0])?.set_events([note(220.0), note(330.0), note(440.0)]))
    }

    #[test]
    fn test_arrangement_renders_to_end_marker() -> anyhow::Result<()> {
        let lead = Voice::new("lead");
        let push = TempoSpan::new(100.0, 1.1, step_multiply);
        let swell = ExponentialDistribution::new("amp", 0.1, 0.8, 3, Measure::BAR)?;

        let verse = Mix::new(vec![
            riff(&lead)?.boxed(),
            SeqSwitch::new(Some(push.set_tempo("0")?.boxed()), vec![true, false])?.boxed(),
        ]);
        let chorus = Mix::new(vec![
            RandomPattern::with_seed(vec![riff(&lead)?.boxed(), riff(&lead)?.boxed()], 3)?.boxed(),
            swell.modify_voice("0", &lead)?.boxed(),
        ]);
        let mut song = Sequence::new(vec![
            verse.boxed(),
            chorus.boxed(),
            End::new("3/4")?.boxed(),
            riff(&lead)?.boxed(),
        ])?;
        assert_eq!(song.num_bars(), 4);

        let mut track = Track::new(TrackConfig {
            tempo: 90.0,
            ..TrackConfig::default()
        })?;
        let schedule = track.render(&mut song)?;

        assert!(schedule.ended);
        assert_eq!(schedule.len(), 3);
        assert_eq!(
            schedule.bars[0].positions(),
            vec![Measure::ZERO, Measure::new(1, 2), Measure::new(3, 4)]
        );
        assert!((schedule.bars[1].tempo - 110.0).abs() < 1e-9);
        assert_eq!(track.tempo(), schedule.bars[2].tempo);
        // riff plus three amp changes
        assert_eq!(schedule.bars[1].events.len(), 6);
        assert_eq!(schedule.bars[2].events[0].event, Event::end());
        Ok(())
    }

    #[test]
    fn test_bar_length_from_config() -> anyhow::Result<()> {
        let lead = Voice::new("lead");
        let mut track = Track::new(serde_json::from_str(r#"{ "bar": "7/8" }"#)?)?;

        let schedule = track.render_looping(&mut riff(&lead)?, 2)?;

        for bar in &schedule.bars {
            assert_eq!(bar.length, Measure::new(7, 8));
            assert_eq!(
                bar.positions(),
                vec![Measure::ZERO, Measure::new(7, 16), Measure::new(21, 32)]
            );
        }
        Ok(())
    }
}
