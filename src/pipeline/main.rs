use crate::config::Config;
use crate::device_display::interface::DeviceDisplay;
use crate::device_input::interface::DeviceInput;
use crate::history::interface::HistoryStore;
use crate::image_classifier::interface::ImageClassifier;
use crate::image_source::interface::ImageSource;
use crate::library::logger::interface::Logger;
use crate::pipeline::core::{init, transition, Effect, Event, Model, PipelineState};
use crate::pipeline::render::Render;
use crate::pipeline::run_effect::RunEffect;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};

type Subscriber = Box<dyn FnMut(&PipelineState)>;

/// Owns the model and is the only place it changes. Background effects report
/// back through the event channel and are applied here, on the caller's thread.
pub struct Pipeline {
    model: Model,
    event_receiver: Receiver<Event>,
    logger: Arc<dyn Logger + Send + Sync>,
    run_effect: RunEffect,
    render: Render,
    subscribers: Vec<Subscriber>,
}

impl Pipeline {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_input: Arc<dyn DeviceInput + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        image_source: Arc<dyn ImageSource + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        history: Arc<dyn HistoryStore + Send + Sync>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();
        let logger = logger.with_namespace("pipeline");

        let run_effect = RunEffect::new(
            config.clone(),
            logger.clone(),
            device_input,
            image_source,
            image_classifier,
            history,
            event_sender,
        );
        let render = Render::new(device_display, config);

        Self {
            model: Model::default(),
            event_receiver,
            logger,
            run_effect,
            render,
            subscribers: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Called with each new state, on the thread driving the pipeline.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&PipelineState) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (model, effects) = init();
        self.model = model;
        self.render.render(&self.model)?;
        self.run_effects(effects);
        Ok(())
    }

    pub fn dispatch(&mut self, event: Event) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let _ = self
            .logger
            .info(&format!("Event: {}", event.to_display_string()));

        let previous_state = self.model.state.clone();
        let previous_in_flight = self.model.in_flight;

        let (model, effects) = transition(std::mem::take(&mut self.model), event);
        self.model = model;

        // A request that settles into the same state as before still counts as a change.
        let settled = previous_in_flight.is_some() && self.model.in_flight.is_none();
        if self.model.state != previous_state || settled {
            let _ = self.logger.info(&format!(
                "State: {:?} -> {:?}",
                previous_state, self.model.state
            ));
            for subscriber in self.subscribers.iter_mut() {
                subscriber(&self.model.state);
            }
        }

        self.render.render(&self.model)?;
        self.run_effects(effects);

        Ok(())
    }

    /// Waits for the next event and applies it.
    pub fn step(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let event = self.event_receiver.recv()?;
        self.dispatch(event)
    }

    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.start()?;

        while self.model.running {
            self.step()?;
        }

        let _ = self.logger.info("Stopped");
        Ok(())
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            if effect.runs_in_background() {
                let run_effect = self.run_effect.clone();
                std::thread::spawn(move || run_effect.run_effect(effect));
            } else {
                self.run_effect.run_effect(effect);
            }
        }
    }
}
