//! Event producers and the single consumer loop that drives the simulation.
//!
//! A tick clock and an input reader run on their own threads and feed one
//! `mpsc` channel. The consumer handles exactly one event per wake-up,
//! drains whatever queued up behind it, and redraws once the queue is empty.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event as term_event;
use rand::Rng;
use tracing::{debug, error, info};

use crate::error::AppError;
use crate::game::{Outcome, Simulation};
use crate::input::map_key;
use crate::snake::Direction;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Messages delivered to the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Event {
    Tick,
    Turn(Direction),
    Confirm,
    Quit,
    /// External stop request (Ctrl+C, input failure).
    Shutdown,
    Resize,
}

/// Why the game loop returned.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LoopExit {
    Terminated(Outcome),
    Quit,
    Shutdown,
}

/// Background producer threads. Dropping stops and joins them.
pub struct Producers {
    stop: Arc<AtomicBool>,
    handles: Vec<JoinHandle<()>>,
}

impl Producers {
    /// Starts the tick clock and the terminal input reader.
    pub fn spawn(tx: &Sender<Event>, tick_interval: Duration) -> io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let mut producers = Self {
            stop: Arc::clone(&stop),
            handles: Vec::with_capacity(2),
        };

        producers
            .handles
            .push(spawn_ticker(tx.clone(), tick_interval, Arc::clone(&stop))?);
        producers
            .handles
            .push(spawn_input_reader(tx.clone(), stop)?);

        Ok(producers)
    }
}

impl Drop for Producers {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

fn spawn_ticker(
    tx: Sender<Event>,
    interval: Duration,
    stop: Arc<AtomicBool>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("tick-clock".into())
        .spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                thread::sleep(interval);
                if tx.send(Event::Tick).is_err() {
                    break;
                }
            }
            debug!("tick clock stopped");
        })
}

fn spawn_input_reader(tx: Sender<Event>, stop: Arc<AtomicBool>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("input-reader".into())
        .spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let event = match read_input() {
                    Ok(Some(event)) => event,
                    Ok(None) => continue,
                    Err(err) => {
                        error!(?err, "failed to read terminal input");
                        Event::Shutdown
                    }
                };

                if tx.send(event).is_err() || event == Event::Shutdown {
                    break;
                }
            }
            debug!("input reader stopped");
        })
}

fn read_input() -> io::Result<Option<Event>> {
    if !term_event::poll(INPUT_POLL_INTERVAL)? {
        return Ok(None);
    }

    let event = match term_event::read()? {
        term_event::Event::Key(key) => map_key(key),
        term_event::Event::Resize(..) => Some(Event::Resize),
        _ => None,
    };
    Ok(event)
}

/// Runs the game until it ends, the player quits, or shutdown is requested.
///
/// `draw` is called at most once per drained backlog, and once more with
/// the final board when the game terminates.
pub fn run_game<R, F>(
    rx: &Receiver<Event>,
    sim: &mut Simulation<R>,
    mut draw: F,
) -> Result<LoopExit, AppError>
where
    R: Rng,
    F: FnMut(&Simulation<R>) -> io::Result<()>,
{
    let mut dirty = true;

    loop {
        let event = rx.recv().map_err(|_| AppError::Disconnected)?;
        let mut exit = apply_event(sim, event, &mut dirty);

        while exit.is_none() {
            match rx.try_recv() {
                Ok(event) => exit = apply_event(sim, event, &mut dirty),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }

        match exit {
            Some(LoopExit::Terminated(outcome)) => {
                draw(sim)?;
                info!(?outcome, score = sim.score(), "game over");
                return Ok(LoopExit::Terminated(outcome));
            }
            Some(other) => {
                info!(exit = ?other, score = sim.score(), "game interrupted");
                return Ok(other);
            }
            None => {}
        }

        if dirty {
            draw(sim)?;
            dirty = false;
        }
    }
}

fn apply_event<R: Rng>(
    sim: &mut Simulation<R>,
    event: Event,
    dirty: &mut bool,
) -> Option<LoopExit> {
    match event {
        Event::Tick => {
            let outcome = sim.step();
            *dirty = true;
            outcome
                .is_terminal()
                .then_some(LoopExit::Terminated(outcome))
        }
        Event::Turn(direction) => {
            sim.set_direction(direction);
            None
        }
        Event::Resize => {
            *dirty = true;
            None
        }
        Event::Confirm => None,
        Event::Quit => Some(LoopExit::Quit),
        Event::Shutdown => Some(LoopExit::Shutdown),
    }
}

/// Keeps the final screen up until the player dismisses it.
///
/// Returns `Shutdown` if the stop came from outside, `Quit` otherwise.
pub fn wait_for_dismiss<F>(rx: &Receiver<Event>, mut redraw: F) -> Result<LoopExit, AppError>
where
    F: FnMut() -> io::Result<()>,
{
    loop {
        match rx.recv().map_err(|_| AppError::Disconnected)? {
            Event::Quit | Event::Confirm => return Ok(LoopExit::Quit),
            Event::Shutdown => return Ok(LoopExit::Shutdown),
            Event::Resize => redraw()?,
            Event::Tick | Event::Turn(_) => {}
        }
    }
}
