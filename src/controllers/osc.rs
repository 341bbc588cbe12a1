// src/controllers/osc.rs
// OSC Controller
//
// Lets another program fire the cannon over UDP.
//   /confetti/fire            bump the trigger counter by one
//   /confetti/counter <int>   set the trigger counter outright

use crate::animation::{ConfettiCannon, TriggerCounter};
use log::warn;
use nannou_osc as osc;
use rand::Rng;
use std::error::Error;

pub const FIRE_ADDR: &str = "/confetti/fire";
pub const COUNTER_ADDR: &str = "/confetti/counter";

#[derive(Debug, PartialEq)]
pub enum OscCommand {
    Fire,
    SetCounter(i64),
}

pub struct OscController {
    command_queue: Vec<OscCommand>,
    receiver: osc::Receiver,
}

impl OscController {
    pub fn new(port: u16) -> Result<Self, Box<dyn Error>> {
        let receiver = osc::receiver(port)?;

        Ok(Self {
            command_queue: Vec::new(),
            receiver,
        })
    }

    pub fn process_messages(&mut self) {
        for (packet, _addr) in self.receiver.try_iter() {
            for message in packet.into_msgs() {
                match parse_message(&message.addr, &message.args) {
                    Some(command) => self.command_queue.push(command),
                    None => warn!(
                        "Unhandled OSC message: {} {:?}",
                        message.addr, message.args
                    ),
                }
            }
        }
    }

    pub fn take_commands(&mut self) -> Vec<OscCommand> {
        std::mem::take(&mut self.command_queue)
    }
}

impl OscCommand {
    pub fn apply(&self, trigger: &TriggerCounter) {
        match self {
            OscCommand::Fire => {
                trigger.increment();
            }
            OscCommand::SetCounter(value) => trigger.set(*value),
        }
    }
}

/// Applies queued commands in order. The cannon looks at the counter after
/// every command, so two fires in one frame are two bursts.
pub fn apply_commands<R: Rng>(
    commands: impl IntoIterator<Item = OscCommand>,
    trigger: &TriggerCounter,
    cannon: &mut ConfettiCannon<R>,
) {
    for command in commands {
        command.apply(trigger);
        cannon.sync_trigger();
    }
}

pub fn parse_message(addr: &str, args: &[osc::Type]) -> Option<OscCommand> {
    match (addr, args) {
        (FIRE_ADDR, []) => Some(OscCommand::Fire),
        (COUNTER_ADDR, [osc::Type::Int(value)]) => Some(OscCommand::SetCounter(*value as i64)),
        (COUNTER_ADDR, [osc::Type::Long(value)]) => Some(OscCommand::SetCounter(*value)),
        _ => None,
    }
}

// Sends to our own receiver so keyboard shortcuts travel the same path
// as remote triggers.
pub struct OscSender {
    sender: osc::Sender,
    target_addr: String,
    target_port: u16,
}

impl OscSender {
    pub fn new(target_port: u16) -> Result<Self, Box<dyn Error>> {
        let target_addr = "127.0.0.1".to_string();
        let sender = osc::sender()?;

        Ok(Self {
            sender,
            target_addr,
            target_port,
        })
    }

    pub fn send_fire(&self) {
        let args: Vec<osc::Type> = Vec::new();
        self.send(FIRE_ADDR, args);
    }

    pub fn send_counter(&self, value: i32) {
        self.send(COUNTER_ADDR, vec![osc::Type::Int(value)]);
    }

    fn send(&self, addr: &str, args: Vec<osc::Type>) {
        if let Err(err) = self.sender.send(
            (addr.to_string(), args),
            (self.target_addr.as_str(), self.target_port),
        ) {
            warn!("Failed to send OSC message {}: {:?}", addr, err);
        }
    }
}
