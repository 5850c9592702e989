use std::error::Error;
use std::fs;
use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use crab8_core::{Config, Console};
use crab8_display::Display;

use crate::audio::Beeper;
use crate::keymap::keymap;
use crate::Args;

pub fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = Config {
        cycles_per_frame: args.cycles_per_frame,
        ..Config::default()
    };
    let mut console = match args.seed {
        Some(seed) => Console::with_seed(config, seed),
        None => Console::new(config),
    };

    let rom = fs::read(&args.rom)?;
    console.insert_program(&rom)?;

    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl, args.scale)?;
    let mut beeper = Beeper::new(&sdl)?;
    let mut events = sdl.event_pump()?;

    let frame_interval = console.config().frame_interval;
    let mut accumulated = Duration::ZERO;
    let mut last = Instant::now();

    'frame: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'frame,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(pad) = keymap(key) {
                        console.set_key_down(pad)?;
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(pad) = keymap(key) {
                        console.set_key_up(pad)?;
                    }
                }
                _ => continue,
            }
        }

        // Run one frame per elapsed interval; a slow host iteration is
        // caught up with extra frames rather than slowing the machine.
        let now = Instant::now();
        accumulated += now - last;
        last = now;
        while accumulated >= frame_interval {
            console.cycle()?;
            accumulated -= frame_interval;
        }

        if console.should_render() {
            display.render(console.framebuffer())?;
        }
        if console.sound_active() {
            beeper.play();
        } else {
            beeper.stop();
        }

        std::thread::sleep(frame_interval - accumulated);
    }

    Ok(())
}
