use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use log::{error, info};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

use cdg::cdg::{SCREEN_HEIGHT, SCREEN_WIDTH};
use cdg::config::{Config, Mode};
use cdg::packet::{read_packets, PACKET_DURATION};
use cdg::player::Player;
use cdg::{decode, render, Error, SubCode};

const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(match e {
            Error::Usage(_) => 2,
            _ => 1,
        });
    }
}

fn run() -> Result<(), Error> {
    let config = Config::from_args(std::env::args().skip(1))?;
    let file = File::open(&config.path)?;
    let packets = read_packets(BufReader::new(file))?;
    info!(
        "Read {} packets ({:.1}s) from {}",
        packets.len(),
        (PACKET_DURATION * packets.len() as u32).as_secs_f64(),
        config.path.display()
    );
    match config.mode {
        Mode::Dump => {
            dump(&packets);
            Ok(())
        }
        Mode::Play => play(&config, Player::from_packets(&packets)),
    }
}

fn dump(packets: &[SubCode]) {
    let mut counts = BTreeMap::new();
    for (i, sub) in packets.iter().enumerate() {
        let instruction = decode(sub);
        let at = PACKET_DURATION * i as u32;
        println!("{:>7} {:>9.3}s {:?}", i, at.as_secs_f64(), instruction);
        *counts.entry(instruction.name()).or_insert(0_usize) += 1;
    }
    println!();
    for (name, count) in counts {
        println!("{:>20}: {}", name, count);
    }
}

fn play(config: &Config, mut player: Player) -> Result<(), Error> {
    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();
    let window = {
        let size = LogicalSize::new(SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64);
        let scaled = LogicalSize::new(
            (SCREEN_WIDTH as u32 * config.scale) as f64,
            (SCREEN_HEIGHT as u32 * config.scale) as f64,
        );
        WindowBuilder::new()
            .with_title(format!("CD+G - {}", config.path.display()))
            .with_inner_size(scaled)
            .with_min_inner_size(size)
            .build(&event_loop)?
    };
    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32, surface_texture)?
    };
    let transparency = config.transparency;
    let start = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        if let Event::RedrawRequested(_) = event {
            render::draw(player.cdg(), pixels.get_frame(), transparency);
            if let Err(e) = pixels.render() {
                error!("pixels.render() failed: {}", e);
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        if input.update(&event) {
            if input.key_pressed(VirtualKeyCode::Escape) || input.quit() {
                *control_flow = ControlFlow::Exit;
                return;
            }
            if let Some(size) = input.window_resized() {
                pixels.resize_surface(size.width, size.height);
                window.request_redraw();
            }
            let was_finished = player.is_finished();
            if player.advance_to(start.elapsed()) > 0 {
                window.request_redraw();
            }
            if player.is_finished() && !was_finished {
                info!("Reached end of stream, {} tiles skipped", player.skipped());
            }
            *control_flow = ControlFlow::WaitUntil(Instant::now() + FRAME_INTERVAL);
        }
    });
}
