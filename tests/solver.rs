use herding::coord::Pos;
use herding::parser::parse_puzzles;
use herding::puzzle::Puzzle;
use herding::search::{is_solved, solve_puzzle, SolutionSummary};

fn puzzle(src: &str) -> Puzzle {
    parse_puzzles(src).puzzles.remove(0)
}

#[test]
fn already_solved_puzzle_needs_no_moves() {
    let p = puzzle("# 1\nb\npieces: B@0,0\noptimal: 1\n");
    let solution = solve_puzzle(&p).unwrap();
    assert_eq!(solution.steps, 0);
    assert!(solution.actions.is_empty());
}

#[test]
fn jump_over_a_sheep_solves_in_one() {
    let p = puzzle("# 1\n..b.\npieces: B@0,0 W@1,0\noptimal: 1\n");
    let solution = solve_puzzle(&p).unwrap();
    assert_eq!(solution.steps, 1);
    assert_eq!(solution.actions, vec!["A↠".to_string()]);
    // The jumped-over sheep did not move.
    assert_eq!(solution.terminal.slots[1].pos, Pos::new(1, 0));
}

#[test]
fn goal_out_of_reach_within_bound_is_not_solved() {
    let p = puzzle("# 1\n...b\npieces: B@0,0 W@1,0\noptimal: 1\n");
    assert!(solve_puzzle(&p).is_none());
}

#[test]
fn jump_then_slide_solves_in_two() {
    let p = puzzle("# 1\n...b\n....\npieces: B@0,0 W@1,0\noptimal: 2\n");
    let solution = solve_puzzle(&p).unwrap();
    assert_eq!(solution.steps, 2);
    assert_eq!(
        solution.actions,
        vec!["A↠".to_string(), "A▶".to_string()]
    );
}

#[test]
fn search_is_deterministic() {
    let p = puzzle("# 1\n...b\n....\npieces: B@0,0 W@1,0\noptimal: 2\n");
    let first = solve_puzzle(&p).unwrap();
    let second = solve_puzzle(&p).unwrap();
    assert_eq!(first.steps, second.steps);
    assert_eq!(first.actions, second.actions);
}

#[test]
fn finds_shorter_solutions_than_declared() {
    let p = puzzle("# 1\n....b\n.....\npieces: B@0,0\noptimal: 3\n");
    let solution = solve_puzzle(&p).unwrap();
    assert_eq!(solution.steps, 1);

    let summary = SolutionSummary::new(&p, Some(&solution));
    assert!(summary.solved);
    assert!(summary.better_than_declared);
    assert_eq!(summary.steps, Some(1));
}

#[test]
fn summary_of_an_unsolved_puzzle() {
    let p = puzzle("# 1\n...b\npieces: B@0,0 W@1,0\noptimal: 1\n");
    let summary = SolutionSummary::new(&p, None);
    assert!(!summary.solved);
    assert_eq!(summary.steps, None);
    assert!(summary.actions.is_empty());
}

#[test]
fn covered_goal_piece_does_not_count() {
    let p = puzzle("# 1\n.w\n..\npieces: W@1,0 B@1,0\noptimal: 1\n");
    assert!(!is_solved(&p.board, &p.roster, &p.start));
    assert!(solve_puzzle(&p).is_none());
}

#[test]
fn herd_goal_needs_every_member_exposed() {
    let free = puzzle("# 1\nw.\nw.\npieces: WW@0,0+0,1\noptimal: 1\n");
    assert!(is_solved(&free.board, &free.roster, &free.start));

    // A shepherd parked on the second segment spoils the first one's goal.
    let burdened = puzzle("# 1\nw.\n..\npieces: WW@0,0+0,1 B@0,1\noptimal: 1\n");
    assert!(!is_solved(&burdened.board, &burdened.roster, &burdened.start));
}

#[test]
fn memo_keeps_the_bounded_tree_small() {
    let p = puzzle("# 1\n....b\n.....\n.....\npieces: B@0,0 B@0,1\noptimal: 3\n");
    let solution = solve_puzzle(&p).unwrap();
    assert_eq!(solution.steps, 1);
    assert!(solution.stats.admitted <= solution.stats.generated);
    assert!(solution.stats.visited >= 1);
}
