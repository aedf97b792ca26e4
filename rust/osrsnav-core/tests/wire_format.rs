use osrsnav_core::edge::{Door, GameObjectEdge, ItemTeleport, SpellTeleport, Step};
use osrsnav_core::{decode_route, Coordinate, Edge, Pattern};
use serde_json::json;

fn pat(s: &str) -> Pattern { Pattern::new(s).unwrap() }

fn every_kind() -> Vec<Edge> {
    vec![
        Edge::Step(Step { position: Coordinate::new(3164, 3484, 0) }),
        Edge::Door(Door { id: 1535, position: Coordinate::new(3165, 3484, 0), action: pat("^Open$") }),
        Edge::GameObject(GameObjectEdge { id: 16671, position: Coordinate::new(3204, 3207, 0), action: pat("Climb-up") }),
        Edge::SpellTeleport(SpellTeleport { spell: "Lumbridge Teleport".into() }),
        Edge::ItemTeleport(ItemTeleport { item: pat("^Ring of dueling\\(\\d\\)$"), action: pat("Rub") }),
    ]
}

#[test]
fn route_survives_encode_and_decode_in_order() {
    let route = every_kind();
    let wire = serde_json::to_value(&route).unwrap();
    let tags: Vec<&str> = wire.as_array().unwrap().iter().map(|e| e["type"].as_str().unwrap()).collect();
    assert_eq!(tags, vec!["Step", "Door", "GameObject", "SpellTeleport", "ItemTeleport"]);

    let back = decode_route(wire.clone()).unwrap();
    assert_eq!(back, route);

    let via_serde: Vec<Edge> = serde_json::from_str(&wire.to_string()).unwrap();
    assert_eq!(via_serde, route);
}

#[test]
fn server_shaped_route_decodes() {
    let body = r#"[
        {"type":"Step","position":{"x":3222,"y":3218,"plane":0}},
        {"type":"Door","id":1543,"position":{"x":3223,"y":3218,"plane":0},"action":"Open"},
        {"type":"ItemTeleport","item":"Games necklace.*","action":"Rub"}
    ]"#;
    let route: Vec<Edge> = serde_json::from_str(body).unwrap();
    assert_eq!(route.len(), 3);
    match &route[2] {
        Edge::ItemTeleport(t) => {
            assert!(t.item.is_match("Games necklace(8)"));
            assert_eq!(t.action.as_str(), "Rub");
        }
        other => panic!("unexpected edge {other:?}"),
    }
}

#[test]
fn null_pattern_in_an_edge_is_rejected() {
    let v = json!([{"type": "ItemTeleport", "item": null, "action": "Rub"}]);
    assert!(decode_route(v).is_err());
}
