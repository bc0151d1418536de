use vibe_shooter::types::*;

fn arena() -> Arena {
    Arena::new(1600.0, 900.0)
}

#[test]
fn rect_inside_arena_is_in_bounds_on_both_axes() {
    let arena = arena();
    for rect in [
        Rect::new(0.0, 0.0, 10.0, 10.0),
        Rect::new(800.0, 400.0, 100.0, 100.0),
        Rect::new(1500.0, 800.0, 100.0, 100.0),
    ] {
        assert_eq!(in_bounds(&rect, &arena), (true, true), "{:?}", rect);
        assert!(fully_inside(&rect, &arena));
    }
}

#[test]
fn each_violated_edge_clears_its_axis_flag() {
    let arena = arena();
    assert_eq!(in_bounds(&Rect::new(-1.0, 100.0, 10.0, 10.0), &arena), (false, true));
    assert_eq!(in_bounds(&Rect::new(1595.0, 100.0, 10.0, 10.0), &arena), (false, true));
    assert_eq!(in_bounds(&Rect::new(100.0, -0.5, 10.0, 10.0), &arena), (true, false));
    assert_eq!(in_bounds(&Rect::new(100.0, 895.0, 10.0, 10.0), &arena), (true, false));
    assert_eq!(in_bounds(&Rect::new(-5.0, 899.0, 10.0, 10.0), &arena), (false, false));
    assert!(!fully_inside(&Rect::new(-5.0, 100.0, 10.0, 10.0), &arena));
}

#[test]
fn direction_is_unit_length_toward_target() {
    let from = Rect::from_center(Vector2D::new(100.0, 100.0), (20.0, 20.0));
    let targets = [
        Vector2D::new(400.0, 500.0),
        Vector2D::new(-30.0, 100.0),
        Vector2D::new(100.0, 101.0),
        Vector2D::new(1500.0, 10.0),
    ];
    for target in targets {
        let to = Rect::from_center(target, (50.0, 80.0));
        let dir = direction(&from, &to);
        assert!((dir.length() - 1.0).abs() < 1e-9, "{:?}", dir);
        let expected = target.sub(from.center());
        // Same orientation: positive dot product, zero cross product.
        assert!(dir.x * expected.x + dir.y * expected.y > 0.0);
        assert!((dir.x * expected.y - dir.y * expected.x).abs() < 1e-6);
    }
}

#[test]
fn direction_between_coincident_centers_is_zero() {
    let a = Rect::from_center(Vector2D::new(300.0, 300.0), (10.0, 10.0));
    let b = Rect::from_center(Vector2D::new(300.0, 300.0), (90.0, 40.0));
    assert_eq!(direction(&a, &b), Vector2D::zero());
}

#[test]
fn touching_edges_do_not_intersect() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 0.0, 10.0, 10.0);
    let c = Rect::new(9.5, 9.5, 10.0, 10.0);
    assert!(!a.intersects(&b));
    assert!(a.intersects(&c));
    assert!(c.intersects(&a));
}
