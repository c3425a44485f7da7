use herding::coord::{Dir, Pos};
use herding::movegen::{apply_slide, slide_vector};
use herding::parser::parse_puzzles;
use herding::pieces::PieceId;
use herding::puzzle::Puzzle;

fn puzzle(src: &str) -> Puzzle {
    parse_puzzles(src).puzzles.remove(0)
}

#[test]
fn slide_runs_until_the_edge() {
    let p = puzzle("# 1\n....b\npieces: B@0,0\noptimal: 1\n");
    let out = slide_vector(&p.board, &p.start, Pos::new(0, 0), Dir::Right, None);
    assert_eq!(out.vector, Some(Pos::new(4, 0)));
    assert!(!out.on_command);
    assert!(!out.aborted);
}

#[test]
fn slide_stops_at_a_wall() {
    let p = puzzle("# 1\n....b\npieces: B@0,0\nwalls: 1,0|2,0\noptimal: 1\n");
    let out = slide_vector(&p.board, &p.start, Pos::new(0, 0), Dir::Right, None);
    assert_eq!(out.vector, Some(Pos::new(1, 0)));
}

#[test]
fn slide_stops_before_another_piece() {
    let p = puzzle("# 1\n....b\npieces: B@0,0 W@2,0\noptimal: 1\n");
    let out = slide_vector(&p.board, &p.start, Pos::new(0, 0), Dir::Right, None);
    assert_eq!(out.vector, Some(Pos::new(1, 0)));
}

#[test]
fn bump_blocks_both_origin_and_destination() {
    let origin = puzzle("# 1\no...b\npieces: B@0,0\noptimal: 1\n");
    let out = slide_vector(
        &origin.board,
        &origin.start,
        Pos::new(0, 0),
        Dir::Right,
        None,
    );
    assert_eq!(out.vector, None);
    assert!(!out.aborted);

    let dest = puzzle("# 1\n.o..b\npieces: B@0,0\noptimal: 1\n");
    let out = slide_vector(&dest.board, &dest.start, Pos::new(0, 0), Dir::Right, None);
    assert_eq!(out.vector, None);
}

#[test]
fn hole_pins_its_occupant_but_catches_a_slider() {
    let pinned = puzzle("# 1\nu...b\npieces: B@0,0\noptimal: 1\n");
    let out = slide_vector(
        &pinned.board,
        &pinned.start,
        Pos::new(0, 0),
        Dir::Right,
        None,
    );
    assert_eq!(out.vector, None);

    // A slide entering a hole comes to rest in it.
    let catching = puzzle("# 1\n.u.b\npieces: B@0,0\noptimal: 1\n");
    let out = slide_vector(
        &catching.board,
        &catching.start,
        Pos::new(0, 0),
        Dir::Right,
        None,
    );
    assert_eq!(out.vector, Some(Pos::new(1, 0)));
}

#[test]
fn slide_onto_a_death_tile_aborts() {
    let p = puzzle("# 1\n..x.b\npieces: B@0,0\noptimal: 1\n");
    let out = slide_vector(&p.board, &p.start, Pos::new(0, 0), Dir::Right, None);
    assert!(out.aborted);
    assert_eq!(out.vector, None);
}

#[test]
fn slide_wrapping_back_to_its_start_aborts() {
    let p = puzzle("# 1\nb...\n....\npieces: B@3,1\noptimal: 1\n");
    let out = slide_vector(&p.board, &p.start, Pos::new(3, 1), Dir::Down, None);
    assert!(out.aborted);
}

#[test]
fn crossing_a_command_tile_is_reported() {
    let p = puzzle("# 1\n.+..b\npieces: B@0,0\noptimal: 1\n");
    let out = slide_vector(&p.board, &p.start, Pos::new(0, 0), Dir::Right, None);
    assert_eq!(out.vector, Some(Pos::new(4, 0)));
    assert!(out.on_command);
}

#[test]
fn starting_on_a_command_tile_counts_once_moved() {
    let p = puzzle("# 1\n+...b\npieces: B@0,0\noptimal: 1\n");
    let out = slide_vector(&p.board, &p.start, Pos::new(0, 0), Dir::Right, None);
    assert_eq!(out.vector, Some(Pos::new(4, 0)));
    assert!(out.on_command);
}

#[test]
fn slide_carries_the_whole_stack() {
    let p = puzzle("# 1\n....b\npieces: W@0,0 B@0,0\noptimal: 1\n");
    let sheep = PieceId(0);
    let shepherd = PieceId(1);

    let out = slide_vector(&p.board, &p.start, Pos::new(0, 0), Dir::Right, None);
    assert_eq!(out.vector, Some(Pos::new(4, 0)));

    let (slots, moved) = apply_slide(&p.board, &p.roster, &p.start, shepherd, Pos::new(4, 0));
    assert!(moved.contains(&shepherd) && moved.contains(&sheep));
    assert_eq!(slots[shepherd.0].pos, Pos::new(4, 0));
    assert_eq!(slots[sheep.0].pos, Pos::new(4, 0));
    assert_eq!(slots[shepherd.0].covers, Some(sheep));
    assert_eq!(slots[sheep.0].covered_by, Some(shepherd));
}

#[test]
fn wall_cannot_slice_a_moving_herd() {
    let herd = [PieceId(0), PieceId(1)];

    let sliced = puzzle(
        "# 1\nw...\n....\npieces: WW@1,0+1,1 B@1,0\nwalls: 2,0|2,1\noptimal: 1\n",
    );
    let out = slide_vector(
        &sliced.board,
        &sliced.start,
        Pos::new(1, 0),
        Dir::Right,
        Some(&herd),
    );
    assert_eq!(out.vector, None);

    let free = puzzle("# 1\nw...\n....\npieces: WW@1,0+1,1 B@1,0\noptimal: 1\n");
    let out = slide_vector(
        &free.board,
        &free.start,
        Pos::new(1, 0),
        Dir::Right,
        Some(&herd),
    );
    assert_eq!(out.vector, Some(Pos::new(2, 0)));
}

#[test]
fn herd_is_pinned_only_when_every_member_rests_on_a_hole() {
    let herd = [PieceId(0), PieceId(1)];

    let pinned = puzzle("# 1\nwu..\n.u..\npieces: WW@1,0+1,1 B@1,0\noptimal: 1\n");
    let out = slide_vector(
        &pinned.board,
        &pinned.start,
        Pos::new(1, 0),
        Dir::Right,
        Some(&herd),
    );
    assert_eq!(out.vector, None);

    let half = puzzle("# 1\nwu..\n....\npieces: WW@1,0+1,1 B@1,0\noptimal: 1\n");
    let out = slide_vector(
        &half.board,
        &half.start,
        Pos::new(1, 0),
        Dir::Right,
        Some(&herd),
    );
    assert_eq!(out.vector, Some(Pos::new(2, 0)));
}
