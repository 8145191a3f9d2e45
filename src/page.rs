//! Page effects driven from the window's frame loop

use std::time::Duration;

use constellation_effects::{
    ContactForm, Counter, FormTransport, Modal, Reveal, RevealFrame, SubmitOutcome, TimerQueue,
    Typewriter, VisibilityTrigger, COUNTER_THRESHOLD,
};
use constellation_field::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PageEvent {
    Type,
    Count(usize),
    ResetContact,
}

pub struct PageEffects {
    timers: TimerQueue<PageEvent>,
    typewriter: Typewriter,
    counters: Vec<(String, Counter)>,
    stats_trigger: VisibilityTrigger,
    stats_reveal: Reveal,
    pub modal: Modal,
    pub contact: Option<ContactForm>,
}

impl PageEffects {
    pub fn new(typewriter: Typewriter, modal: Modal, contact: Option<ContactForm>) -> Self {
        Self {
            timers: TimerQueue::new(),
            typewriter,
            counters: Vec::new(),
            stats_trigger: VisibilityTrigger::new(COUNTER_THRESHOLD),
            stats_reveal: Reveal::default(),
            modal,
            contact,
        }
    }

    pub fn start(&mut self, now: Duration) {
        self.timers.schedule(now, Duration::ZERO, PageEvent::Type);
    }

    /// Report where the stats panel sits; counters start the first time it is
    /// at least half visible, counting up to the given targets
    pub fn observe_stats(
        &mut self,
        now: Duration,
        panel: &Rect,
        viewport: &Rect,
        targets: impl FnOnce() -> Vec<(String, u32)>,
    ) {
        if !self.stats_trigger.observe(panel, viewport) {
            return;
        }

        self.counters = targets()
            .into_iter()
            .map(|(label, target)| (label, Counter::new(target)))
            .collect();
        for index in 0..self.counters.len() {
            self.timers.schedule(now, Duration::ZERO, PageEvent::Count(index));
        }
        self.stats_reveal.start(now);
        log::debug!("stats panel in view, starting {} counters", self.counters.len());
    }

    /// Deliver every due timer
    pub fn update(&mut self, now: Duration) {
        for event in self.timers.poll(now) {
            match event {
                PageEvent::Type => {
                    let delay = self.typewriter.tick();
                    self.timers.schedule(now, delay, PageEvent::Type);
                }
                PageEvent::Count(index) => {
                    if let Some(delay) = self.counters.get_mut(index).and_then(|(_, c)| c.tick()) {
                        self.timers.schedule(now, delay, PageEvent::Count(index));
                    }
                }
                PageEvent::ResetContact => {
                    if let Some(form) = &mut self.contact {
                        form.reset();
                    }
                }
            }
        }
    }

    pub fn submit_contact<T: FormTransport + ?Sized>(&mut self, now: Duration, transport: &T) {
        let Some(form) = &mut self.contact else {
            return;
        };
        if let SubmitOutcome::Sent { reset_after } = form.submit(transport) {
            self.timers.schedule(now, reset_after, PageEvent::ResetContact);
        }
    }

    pub fn typed_text(&self) -> &str {
        self.typewriter.text()
    }

    pub fn counters(&self) -> impl Iterator<Item = (&str, String)> {
        self.counters
            .iter()
            .map(|(label, counter)| (label.as_str(), counter.label()))
    }

    /// Fade for the stats panel body; fully shown until the counters start,
    /// so a panel that never gets half into view is not left blank
    pub fn stats_reveal(&self, now: Duration) -> RevealFrame {
        if self.stats_reveal.is_started() {
            self.stats_reveal.sample(now)
        } else {
            RevealFrame {
                opacity: 1.0,
                offset: 0.0,
            }
        }
    }

    /// Drop every pending alarm
    pub fn shutdown(&mut self) {
        self.timers.cancel_all();
    }
}
