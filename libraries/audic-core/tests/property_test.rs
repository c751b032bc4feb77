//! Property-based tests for the playback state reconciler
//!
//! Uses proptest to verify the reconciliation laws across random sample
//! sequences and inputs.

use audic_core::{
    validate, NotifyMode, PlaybackStateReconciler, PlayerEvent, Polling, Sample,
};
use proptest::prelude::*;

// ===== Helpers =====

fn arbitrary_sample() -> impl Strategy<Value = Sample> {
    (0u64..20).prop_flat_map(|length| (Just(length), 0..=length))
        .prop_map(|(length, time)| Sample::new(length, time))
}

fn count(events: &[PlayerEvent], wanted: PlayerEvent) -> usize {
    events.iter().filter(|e| **e == wanted).count()
}

// ===== Property Tests =====

proptest! {
    /// Property: Valid volumes are accepted and read back unchanged
    #[test]
    fn valid_volume_reads_back(volume in 0.0f64..=1.0) {
        let mut reconciler = PlaybackStateReconciler::new(None, NotifyMode::Notify);
        prop_assert!(reconciler.set_volume(volume).is_ok());
        prop_assert_eq!(reconciler.state().volume, volume);
    }

    /// Property: Out-of-range volumes are rejected and leave the previous value
    #[test]
    fn invalid_volume_keeps_previous(
        previous in 0.0f64..=1.0,
        volume in prop_oneof![-1000.0f64..-0.0001, 1.0001f64..1000.0]
    ) {
        let mut reconciler = PlaybackStateReconciler::new(None, NotifyMode::Notify);
        reconciler.set_volume(previous).unwrap();

        let err = reconciler.set_volume(volume).unwrap_err();
        prop_assert!(err.is_invalid_argument());
        prop_assert_eq!(reconciler.state().volume, previous);
    }

    /// Property: Non-negative integer seek targets are accepted
    #[test]
    fn integer_current_time_accepted(t in 0u32..100_000) {
        prop_assert_eq!(validate::current_time(f64::from(t)).unwrap(), u64::from(t));
    }

    /// Property: Negative or fractional seek targets are rejected
    #[test]
    fn invalid_current_time_rejected(
        whole in 0u32..10_000,
        fraction in 0.01f64..0.99,
        negative in any::<bool>()
    ) {
        let value = f64::from(whole) + fraction;
        let value = if negative { -value } else { value };
        prop_assert!(validate::current_time(value).unwrap_err().is_invalid_argument());
    }

    /// Property: Repeated end-of-media samples emit exactly one `ended`
    #[test]
    fn ended_is_deduplicated(length in 1u64..10_000, repeats in 2usize..10) {
        let mut reconciler = PlaybackStateReconciler::new(Some("a.mp3".into()), NotifyMode::Notify);
        reconciler.request_play();

        let mut ended = 0;
        for _ in 0..repeats {
            let outcome = reconciler.on_sample(Sample::new(length, length));
            ended += count(&outcome.events, PlayerEvent::Ended);
        }

        prop_assert_eq!(ended, 1);
        prop_assert!(reconciler.state().ended);
    }

    /// Property: The stopped sentinel always clears `playing`
    #[test]
    fn sentinel_clears_playing(prior in prop::collection::vec(arbitrary_sample(), 0..20)) {
        let mut reconciler = PlaybackStateReconciler::new(Some("a.mp3".into()), NotifyMode::Notify);
        reconciler.request_play();
        for sample in prior {
            reconciler.on_sample(sample);
        }
        reconciler.request_play();

        reconciler.on_sample(Sample::new(0, 0));
        prop_assert!(!reconciler.state().playing);
    }

    /// Property: `current_time` always mirrors the last sample
    #[test]
    fn current_time_follows_samples(samples in prop::collection::vec(arbitrary_sample(), 1..50)) {
        let mut reconciler = PlaybackStateReconciler::new(None, NotifyMode::Notify);
        for sample in &samples {
            reconciler.on_sample(*sample);
            prop_assert_eq!(reconciler.state().current_time, sample.time);
            prop_assert_eq!(reconciler.state().duration, Some(sample.length));
        }
    }

    /// Property: While looping, polling never stops and `ended` never sticks
    #[test]
    fn looping_never_terminates(samples in prop::collection::vec(arbitrary_sample(), 1..50)) {
        let mut reconciler = PlaybackStateReconciler::new(Some("a.mp3".into()), NotifyMode::Notify);
        reconciler.set_looping(true);
        reconciler.request_play();

        for sample in samples {
            let outcome = reconciler.on_sample(sample);
            prop_assert_eq!(outcome.polling, Polling::Continue);
            prop_assert!(!reconciler.state().ended);
        }
    }

    /// Property: `ended` events never repeat without leaving end-of-media first
    #[test]
    fn ended_requires_edge(samples in prop::collection::vec(arbitrary_sample(), 1..50)) {
        let mut reconciler = PlaybackStateReconciler::new(Some("a.mp3".into()), NotifyMode::Notify);
        reconciler.set_looping(true);

        let mut previous_at_end = false;
        for sample in samples {
            let outcome = reconciler.on_sample(sample);
            let ended = count(&outcome.events, PlayerEvent::Ended);
            if previous_at_end {
                prop_assert_eq!(ended, 0);
            }
            prop_assert_eq!(ended == 1, sample.is_end_of_media() && !previous_at_end);
            previous_at_end = sample.is_end_of_media();
        }
    }
}
