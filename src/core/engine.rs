use crate::core::app::ClinicApp;
use crate::core::scheduler::Scheduler;
use crate::domain::event::{Effect, Event, Step};
use crate::domain::model::{PageLayout, SubmissionOutcome};
use crate::domain::ports::{Clock, SubmissionBackend};
use std::collections::VecDeque;
use std::time::Duration;

/// Runs a `ClinicApp`: timer effects go to the scheduler, submit effects go
/// to the backend, and everything is returned to the caller in order.
pub struct SiteEngine<B: SubmissionBackend, C: Clock> {
    app: ClinicApp,
    scheduler: Scheduler,
    backend: B,
    clock: C,
}

impl<B: SubmissionBackend, C: Clock> SiteEngine<B, C> {
    /// Builds the app and arms the timers its initialisation requested.
    pub fn start(
        site_name: &str,
        layout: &PageLayout,
        fragment: Option<&str>,
        backend: B,
        clock: C,
    ) -> (Self, Vec<Effect>) {
        let (app, effects) = ClinicApp::initialize(site_name, layout, fragment, clock.today());
        let mut engine = Self {
            app,
            scheduler: Scheduler::new(),
            backend,
            clock,
        };
        for effect in &effects {
            engine.apply_timer(effect);
        }
        (engine, effects)
    }

    pub fn app(&self) -> &ClinicApp {
        &self.app
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub async fn dispatch(&mut self, event: &Event) -> Vec<Effect> {
        let effects = self.app.dispatch(event, self.clock.today());
        self.execute(effects).await
    }

    /// Programmatic navigation (call-to-action routing).
    pub async fn route_to(&mut self, id: &str) -> Vec<Effect> {
        let effects = self.app.route_to(id);
        self.execute(effects).await
    }

    /// Moves virtual time forward by `by`, firing due timers in order.
    pub async fn advance(&mut self, by: Duration) -> Vec<Effect> {
        let until = self.scheduler.now() + by;
        let mut out = Vec::new();
        while let Some(timer) = self.scheduler.pop_due(until) {
            tracing::debug!("⏰ Timer {:?} fired at {:?}", timer, self.scheduler.now());
            out.extend(self.dispatch(&Event::TimerFired { timer }).await);
        }
        self.scheduler.settle(until);
        out
    }

    /// Replays a script, handing every effect to `sink`. With `realtime`
    /// the waits also sleep on the tokio clock.
    pub async fn run_script<F>(&mut self, steps: &[Step], realtime: bool, mut sink: F) -> usize
    where
        F: FnMut(&Effect),
    {
        let mut emitted = 0;
        for step in steps {
            let effects = match step {
                Step::Wait { wait_ms } => {
                    let by = Duration::from_millis(*wait_ms);
                    if realtime {
                        tokio::time::sleep(by).await;
                    }
                    self.advance(by).await
                }
                Step::Event(event) => self.dispatch(event).await,
            };
            emitted += effects.len();
            effects.iter().for_each(&mut sink);
        }
        emitted
    }

    async fn execute(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut queue: VecDeque<Effect> = effects.into();
        let mut out = Vec::with_capacity(queue.len());

        while let Some(effect) = queue.pop_front() {
            self.apply_timer(&effect);
            if let Effect::Submit { form, payload } = &effect {
                let outcome = match self.backend.submit(*form, payload).await {
                    Ok(receipt) => SubmissionOutcome::Success {
                        message: receipt.message,
                    },
                    Err(e) => {
                        tracing::error!("❌ {} submission failed: {}", form, e);
                        SubmissionOutcome::Failure {
                            message: e.user_friendly_message(),
                        }
                    }
                };
                let follow_up = self.app.dispatch(
                    &Event::SubmissionFinished {
                        form: *form,
                        outcome,
                    },
                    self.clock.today(),
                );
                queue.extend(follow_up);
            }
            out.push(effect);
        }
        out
    }

    fn apply_timer(&mut self, effect: &Effect) {
        match effect {
            Effect::Schedule {
                timer,
                after,
                repeat,
            } => self.scheduler.schedule(*timer, *after, *repeat),
            Effect::Cancel { timer } => {
                self.scheduler.cancel(*timer);
            }
            _ => {}
        }
    }
}
