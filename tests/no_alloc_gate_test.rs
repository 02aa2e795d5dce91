//! Allocation gate for the per-frame path: tick, input, snapshot and render.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use stackfall::core::clock::ManualClock;
use stackfall::core::{GameSession, GameSnapshot, SessionConfig};
use stackfall::term::{FrameBuffer, GameView, Viewport};
use stackfall::types::{InputEvent, KeyState};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn frame_loop_does_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let clock = ManualClock::new(0);
    let mut gs = GameSession::with_clock(SessionConfig::default().with_seed(1), clock.clone()).unwrap();
    gs.start();

    let view = GameView::default();
    let viewport = Viewport::new(60, 24);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    // Warm-up: run a whole game once so every code path has been taken.
    gs.handle_input(InputEvent::Hold);
    while !gs.game_over() {
        gs.handle_input(InputEvent::HardDrop);
    }
    gs.handle_input(InputEvent::Reset);
    gs.tick();
    gs.snapshot_into(&mut snap);
    view.render_into(&snap, viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        for i in 0..400u64 {
            clock.advance(16);
            match i % 40 {
                0 => {
                    gs.handle_input(InputEvent::MoveLeft(KeyState::Pressed));
                }
                10 => {
                    gs.handle_input(InputEvent::MoveLeft(KeyState::Released));
                    gs.handle_input(InputEvent::RotateCw);
                }
                20 => {
                    gs.handle_input(InputEvent::Hold);
                    gs.handle_input(InputEvent::SoftDrop(KeyState::Pressed));
                }
                30 => {
                    gs.handle_input(InputEvent::SoftDrop(KeyState::Released));
                    gs.handle_input(InputEvent::HardDrop);
                }
                _ => {}
            }
            if gs.game_over() {
                gs.handle_input(InputEvent::Reset);
            }
            gs.tick();
            let _ = gs.take_last_event();

            gs.snapshot_into(&mut snap);
            view.render_into(&snap, viewport, &mut fb);
        }
    });

    assert_eq!(allocs, 0);
}
