//! Steady-state play and drawing reuse their buffers.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering::Relaxed};

use blockfall::core::{GameSnapshot, GameStateMachine};
use blockfall::term::{FrameBuffer, GameView, Viewport};
use blockfall::types::GameAction;

/// System allocator that counts allocations while `ARMED` is set.
struct Tally;

static ARMED: AtomicBool = AtomicBool::new(false);
static ALLOCS: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static ALLOCATOR: Tally = Tally;

unsafe impl GlobalAlloc for Tally {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if ARMED.load(Relaxed) {
            ALLOCS.fetch_add(1, Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

#[test]
fn hard_drop_games_tick_and_render_without_allocating() {
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let mut snap = GameSnapshot::new();
    let mut machine = GameStateMachine::new(1);

    // A new game journals all 200 cells, which sizes the change buffer.
    machine.new_game(&mut ());
    machine.snapshot_into(&mut snap);
    view.render_into(&snap, viewport, &mut fb);

    ARMED.store(true, Relaxed);
    for _ in 0..200 {
        machine.handle_action(GameAction::HardDrop);
        machine.tick(50, &mut ());
        if machine.is_game_over() {
            machine.new_game(&mut ());
        }
        machine.snapshot_into(&mut snap);
        view.render_into(&snap, viewport, &mut fb);
    }
    ARMED.store(false, Relaxed);

    assert_eq!(ALLOCS.load(Relaxed), 0);
}
