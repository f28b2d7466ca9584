use smines_core::*;

fn neighbors(center: Coord2, size: Coord2) -> impl Iterator<Item = Coord2> {
    NeighborIter::new(center, size)
}

#[test]
fn beginner_game_opens_center() {
    for seed in 0..200 {
        let mut field = Minefield::create(9, 9, 10).unwrap();
        let center = field.cursor();
        assert_eq!(center, (4, 4));

        field.place_mines_seeded(center, seed).unwrap();
        field.compute_adjacency().unwrap();
        assert_eq!(field.reveal(center), Ok(RevealOutcome::Revealed));

        let tile = field.tile(center).unwrap();
        assert!(tile.visible);
        assert!(!tile.mine);
        assert_eq!(tile.adjacent_mines, 0, "seed {seed}");
        for pos in neighbors(center, field.size()) {
            assert!(field.tile(pos).unwrap().visible, "seed {seed}, {pos:?}");
        }
    }
}

#[test]
fn flood_opens_exactly_the_zero_region_and_its_border() {
    for seed in 0..50 {
        let mut field = Minefield::new(GameConfig::intermediate()).unwrap();
        let start = field.cursor();
        field.place_mines_seeded(start, seed).unwrap();
        field.compute_adjacency().unwrap();
        field.reveal(start).unwrap();

        // independent search over zero tiles
        let size = field.size();
        let mut expected = vec![vec![false; size.1.into()]; size.0.into()];
        let mut stack = vec![start];
        expected[start.0 as usize][start.1 as usize] = true;
        while let Some(pos) = stack.pop() {
            if field.tile(pos).unwrap().adjacent_mines != 0 {
                continue;
            }
            for next in neighbors(pos, size) {
                let seen = &mut expected[next.0 as usize][next.1 as usize];
                if !*seen {
                    *seen = true;
                    stack.push(next);
                }
            }
        }

        for ((row, col), tile) in field.tiles().indexed_iter() {
            assert_eq!(tile.visible, expected[row][col], "seed {seed}, ({row}, {col})");
            assert!(!(tile.visible && tile.mine));
        }
    }
}

#[test]
fn forced_mine_loses_and_exposes_mines() {
    // a wall of mines in column 6 stops the opening flood
    let wall: Vec<Coord2> = (0..9).map(|row| (row, 6)).collect();
    let mut field = Minefield::create(9, 9, 9).unwrap();
    field.place_mines((4, 4), FixedMineGenerator::new(wall)).unwrap();
    field.compute_adjacency().unwrap();
    assert_eq!(field.reveal((4, 4)), Ok(RevealOutcome::Revealed));

    assert!(field.tile((0, 5)).unwrap().visible);
    let far_side = field.tile((0, 8)).unwrap();
    assert!(!far_side.mine && !far_side.visible);
    assert!(!field.check_victory());

    let before: Vec<bool> = field.tiles().iter().map(|tile| tile.visible).collect();
    assert_eq!(field.reveal((0, 6)), Ok(RevealOutcome::HitMine));

    field.reveal_all_mines();

    for (i, tile) in field.tiles().iter().enumerate() {
        if tile.mine {
            assert!(tile.visible);
        } else {
            assert_eq!(tile.visible, before[i]);
        }
    }
    assert!(!field.tile((0, 8)).unwrap().visible);
    assert!(!field.check_victory());
}

#[test]
fn visibility_never_goes_back() {
    let mut session = GameSession::new(GameConfig::expert(), 1234).unwrap();
    let mut previous: Vec<bool> = session.field().tiles().iter().map(|t| t.visible).collect();

    let moves = [
        Direction::Up,
        Direction::Left,
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Down,
        Direction::Down,
        Direction::Left,
    ];
    for (step, direction) in moves.iter().cycle().take(120).enumerate() {
        if session.state().is_finished() {
            break;
        }
        session.move_cursor(*direction);
        if step % 7 == 3 {
            session.toggle_flag().unwrap();
        } else {
            session.open().unwrap();
        }

        let current: Vec<bool> = session.field().tiles().iter().map(|t| t.visible).collect();
        for (was, is) in previous.iter().zip(&current) {
            assert!(!was || *is);
        }
        let flagged = session.field().tiles().iter().filter(|t| t.flagged).count();
        assert_eq!(usize::from(session.field().placed_flags()), flagged);
        previous = current;
    }
}

#[test]
fn field_serializes_for_inspection() {
    let mut field = Minefield::with_layout(2, 3, &[(0, 0)]).unwrap();
    field.compute_adjacency().unwrap();
    field.reveal((1, 2)).unwrap();

    let json = serde_json::to_string(&field).unwrap();
    let restored: Minefield = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, field);
}

#[test]
fn inconsistent_field_json_is_rejected() {
    let field = Minefield::with_layout(2, 3, &[(0, 0)]).unwrap();
    let json = serde_json::to_value(&field).unwrap();

    let mut wrong_size = json.clone();
    wrong_size["size"] = serde_json::json!([3, 3]);
    assert!(serde_json::from_value::<Minefield>(wrong_size).is_err());

    let mut empty = json.clone();
    empty["size"] = serde_json::json!([0, 3]);
    assert!(serde_json::from_value::<Minefield>(empty).is_err());

    let mut lost_cursor = json.clone();
    lost_cursor["cursor"] = serde_json::json!([2, 0]);
    assert!(serde_json::from_value::<Minefield>(lost_cursor).is_err());

    let mut phantom_flag = json;
    phantom_flag["placed_flags"] = serde_json::json!(1);
    assert!(serde_json::from_value::<Minefield>(phantom_flag).is_err());
}
