use eagle_cad::draw::geometry::{
    Circle, Flip, Hole, Primitive, Rectangle, RenderContext, Rotation, Sign, Smd, Text, Via, Wire,
};
use eagle_cad::draw::layers::{HOLES_LAYER, VIAS_LAYER};
use eagle_cad::draw::svg::Fragment;
use eagle_cad::{open, Geometry, HasGeometry, Layer, LayerSet, Point, RenderOptions, SvgRenderer};

const LIBRARY_PATH: &str = "tests/data/sample.lbr";

#[cfg(test)]
mod tests {
    use super::*;

    fn with_hidden(layers: &LayerSet, number: i32) -> LayerSet {
        LayerSet::new(layers.iter().cloned().map(|mut layer| {
            if layer.number == number {
                layer.visible = false;
            }
            layer
        }))
        .unwrap()
    }

    #[test]
    fn test_symbol_fragments() {
        let doc = open(LIBRARY_PATH).unwrap();
        let library = doc.as_library().unwrap();
        let symbol = library.symbol("GEIGER_TUBE").unwrap();

        let svg = SvgRenderer::default().render(symbol, &library.layers);
        let tags: Vec<_> = svg.fragments.iter().map(Fragment::tag).collect();
        assert_eq!(
            tags,
            vec!["line", "circle", "line", "circle", "line", "circle", "text", "text"]
        );

        let hidden = with_hidden(&library.layers, 94);
        let svg = SvgRenderer::default().render(symbol, &hidden);
        let tags: Vec<_> = svg.fragments.iter().map(Fragment::tag).collect();
        assert_eq!(tags, vec!["circle", "circle", "text", "text"]);
    }

    #[test]
    fn test_hidden_layers_are_skipped() {
        let doc = open(LIBRARY_PATH).unwrap();
        let library = doc.as_library().unwrap();
        let package = library.package("LND712").unwrap();

        // >VALUE sits on tValues, which is hidden in the fixture
        let svg = SvgRenderer::default().render(package, &library.layers);
        assert_eq!(svg.fragments.len(), 5);
        let texts: Vec<_> = svg
            .fragments
            .iter()
            .filter_map(|f| match f {
                Fragment::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec![">NAME"]);

        let no_pads = with_hidden(&library.layers, 17);
        let svg = SvgRenderer::default().render(package, &no_pads);
        assert_eq!(svg.fragments.len(), 3);
    }

    #[test]
    fn test_flip_does_not_change_size() {
        let doc = open(LIBRARY_PATH).unwrap();
        let library = doc.as_library().unwrap();
        let normal = SvgRenderer::new(RenderOptions {
            scale: 3.0,
            ..RenderOptions::default()
        })
        .unwrap();
        let mirrored = SvgRenderer::new(RenderOptions {
            scale: 3.0,
            flip: Flip(Sign::Negative, Sign::Positive),
            ..RenderOptions::default()
        })
        .unwrap();
        for package in library.packages.values() {
            let a = normal.render(package, &library.layers);
            let b = mirrored.render(package, &library.layers);
            assert_eq!((a.width, a.height), (b.width, b.height), "{}", package.name);
            assert_eq!(a.fragments.len(), b.fragments.len());
        }
    }

    #[test]
    fn test_root_size_from_bounding_box() {
        let doc = open(LIBRARY_PATH).unwrap();
        let library = doc.as_library().unwrap();
        let package = library.package("LND712").unwrap();
        let options = RenderOptions {
            scale: 2.0,
            margin: 5.0,
            ..RenderOptions::default()
        };
        let svg = SvgRenderer::new(options).unwrap().render(package, &library.layers);
        let bbox = package.bounding_box();
        assert_eq!(svg.width, (bbox.width() * 2.0).ceil() + 10.0);
        assert_eq!(svg.height, (bbox.height() * 2.0).ceil() + 10.0);
    }

    #[test]
    fn test_empty_geometry() {
        let empty = Geometry::default();
        let bbox = empty.bounding_box();
        assert_eq!((bbox.min, bbox.max), (Point::ORIGIN, Point::ORIGIN));

        let svg = SvgRenderer::default().render(&empty, &LayerSet::default());
        assert!(svg.fragments.is_empty());
        assert_eq!((svg.width, svg.height), (20.0, 20.0));
    }

    #[test]
    fn test_render_many_matches_render() {
        let doc = open(LIBRARY_PATH).unwrap();
        let library = doc.as_library().unwrap();
        let renderer = SvgRenderer::default();
        let symbols: Vec<_> = library.symbols.values().collect();
        let batch = renderer.render_many(&symbols, &library.layers);
        assert_eq!(batch.len(), symbols.len());
        for (symbol, svg) in symbols.iter().zip(&batch) {
            assert_eq!(&renderer.render(*symbol, &library.layers), svg);
        }
    }

    #[test]
    fn test_save_library_to_disk() {
        let doc = open(LIBRARY_PATH).unwrap();
        let library = doc.as_library().unwrap();
        let renderer = SvgRenderer::new(RenderOptions {
            add_bounding_box: true,
            ..RenderOptions::default()
        })
        .unwrap();
        let dir = tempfile::tempdir().unwrap();

        for package in library.packages.values() {
            let path = dir.path().join(format!("{}.svg", package.name));
            renderer.render(package, &library.layers).save(&path).unwrap();
            let content = std::fs::read_to_string(&path).unwrap();
            assert!(content.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"no\"?>"));
            assert!(content.contains("xmlns=\"http://www.w3.org/2000/svg\""));
            assert!(content.contains("fill:rgba(255, 0, 0, 0.1)"));
        }

        let written = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(written, library.packages.len());
    }

    #[test]
    fn test_text_is_escaped_in_output() {
        let doc = open(LIBRARY_PATH).unwrap();
        let library = doc.as_library().unwrap();
        let svg = SvgRenderer::default().render(library.symbol("GEIGER_TUBE").unwrap(), &library.layers);
        let markup = svg.to_svg_string().unwrap();
        assert!(markup.contains("&gt;NAME"));
        assert!(!markup.contains(">NAME<"));
    }

    const MIRRORED: Flip = Flip(Sign::Negative, Sign::Positive);

    fn board_layers() -> LayerSet {
        LayerSet::new([
            Layer::new(1, "Top", 4),
            Layer::new(VIAS_LAYER, "Vias", 2),
            Layer::new(HOLES_LAYER, "Holes", 7),
        ])
        .unwrap()
    }

    fn only(fragments: Vec<Fragment>) -> Fragment {
        assert_eq!(fragments.len(), 1, "{:?}", fragments);
        fragments.into_iter().next().unwrap()
    }

    fn rect_of(fragment: Fragment) -> (f64, f64, f64, f64) {
        match fragment {
            Fragment::Rect { x, y, width, height, .. } => (x, y, width, height),
            other => panic!("Expected rect, got {:?}", other),
        }
    }

    fn circle_of(fragment: Fragment) -> (f64, f64, f64) {
        match fragment {
            Fragment::Circle { cx, cy, r, .. } => (cx, cy, r),
            other => panic!("Expected circle, got {:?}", other),
        }
    }

    #[test]
    fn test_rectangle_corners_under_both_flips() {
        let layers = board_layers();
        let rect = Rectangle {
            start: Point::new(1.0, 2.0),
            end: Point::new(5.0, 3.0),
            layer: 1,
            rotation: Rotation::default(),
        };

        let ctx = RenderContext::new(Point::new(10.0, 20.0), 2.0, Flip::default(), &layers);
        // y is negated, so the top edge (y = 3) becomes the smaller coordinate
        assert_eq!(rect_of(only(rect.render(&ctx))), (22.0, 34.0, 8.0, 2.0));

        let ctx = RenderContext::new(Point::new(10.0, 20.0), 2.0, MIRRORED, &layers);
        assert_eq!(rect_of(only(rect.render(&ctx))), (10.0, 44.0, 8.0, 2.0));
        println!("✓ Rectangle corners follow the flip");
    }

    #[test]
    fn test_text_anchor_under_both_flips() {
        let layers = board_layers();
        let text = Text {
            text: "AB".to_string(),
            position: Point::new(2.0, 4.0),
            size: 2.0,
            layer: 1,
            ratio: None,
            rotation: Rotation::default(),
            font: None,
            align: None,
        };
        let (width, height) = text.calculate_size(1.0);
        assert!((width - 2.2).abs() < 1e-9);
        assert_eq!(height, 2.0);

        let ctx = RenderContext::new(Point::new(10.0, 20.0), 2.0, Flip::default(), &layers);
        match only(text.render(&ctx)) {
            Fragment::Text { x, y, transform, style, .. } => {
                assert_eq!((x, y), (24.0, 34.0));
                assert_eq!(transform, "scale(1 1)");
                assert_eq!(style.get("font-size"), Some("4"));
                assert_eq!(style.get("font-family"), Some("Consolas"));
            }
            other => panic!("Expected text, got {:?}", other),
        }

        // Mirrored x shifts the anchor left by twice the text width
        let ctx = RenderContext::new(Point::new(10.0, 20.0), 2.0, MIRRORED, &layers);
        match only(text.render(&ctx)) {
            Fragment::Text { x, y, transform, .. } => {
                assert!((x - 7.2).abs() < 1e-9, "x = {}", x);
                assert_eq!(y, 44.0);
                assert_eq!(transform, "scale(-1 -1)");
            }
            other => panic!("Expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_smd_quarter_turn_under_both_flips() {
        let layers = board_layers();
        let mut smd = Smd {
            name: "1".to_string(),
            position: Point::new(3.0, 1.0),
            dx: 2.0,
            dy: 1.0,
            layer: 1,
            roundness: 0,
            rotation: Rotation::default(),
            stop: true,
            cream: true,
        };

        let ctx = RenderContext::new(Point::new(10.0, 20.0), 2.0, Flip::default(), &layers);
        assert_eq!(rect_of(only(smd.render(&ctx))), (24.0, 37.0, 4.0, 2.0));

        smd.rotation = Rotation::parse("R90").unwrap();
        assert_eq!(rect_of(only(smd.render(&ctx))), (25.0, 36.0, 2.0, 4.0));

        let ctx = RenderContext::new(Point::new(10.0, 20.0), 2.0, MIRRORED, &layers);
        assert_eq!(rect_of(only(smd.render(&ctx))), (13.0, 40.0, 2.0, 4.0));
    }

    #[test]
    fn test_round_primitives_under_both_flips() {
        let layers = board_layers();
        let circle = Circle {
            center: Point::new(1.0, 1.0),
            radius: 2.0,
            width: 0.5,
            layer: 1,
        };
        let hole = Hole {
            position: Point::new(2.0, -2.0),
            drill: 1.0,
        };
        let via = Via {
            position: Point::new(0.0, 5.0),
            drill: 0.5,
            diameter: Some(1.0),
            extent: "1-16".to_string(),
            shape: None,
        };

        let ctx = RenderContext::new(Point::new(10.0, 20.0), 2.0, Flip::default(), &layers);
        assert_eq!(circle_of(only(circle.render(&ctx))), (22.0, 38.0, 4.0));
        assert_eq!(circle_of(only(hole.render(&ctx))), (24.0, 44.0, 1.0));
        assert_eq!(circle_of(only(via.render(&ctx))), (20.0, 30.0, 1.0));

        let ctx = RenderContext::new(Point::new(10.0, 20.0), 2.0, MIRRORED, &layers);
        assert_eq!(circle_of(only(circle.render(&ctx))), (18.0, 42.0, 4.0));
        assert_eq!(circle_of(only(hole.render(&ctx))), (16.0, 36.0, 1.0));
        assert_eq!(circle_of(only(via.render(&ctx))), (20.0, 50.0, 1.0));

        // Holes draw on layer 45 and vias on layer 18, whatever else is visible
        let top_only = LayerSet::new([Layer::new(1, "Top", 4)]).unwrap();
        let ctx = RenderContext::new(Point::ORIGIN, 1.0, Flip::default(), &top_only);
        assert!(hole.render(&ctx).is_empty());
        assert!(via.render(&ctx).is_empty());
        assert_eq!(circle.render(&ctx).len(), 1);
    }

    #[test]
    fn test_inactive_layer_renders_nothing() {
        let geometry = Geometry::new(vec![
            Primitive::Wire(Wire {
                start: Point::new(0.0, 0.0),
                end: Point::new(5.0, 0.0),
                width: 0.25,
                layer: 1,
                curve: None,
                cap: None,
            }),
            Primitive::Rectangle(Rectangle {
                start: Point::new(0.0, 0.0),
                end: Point::new(1.0, 1.0),
                layer: 1,
                rotation: Rotation::default(),
            }),
        ]);

        let mut top = Layer::new(1, "Top", 4);
        top.active = false;
        let inactive = LayerSet::new([top.clone()]).unwrap();
        let ctx = RenderContext::new(Point::ORIGIN, 1.0, Flip::default(), &inactive);
        assert!(geometry.render_fragments(&ctx).is_empty());
        assert!(SvgRenderer::default().render(&geometry, &inactive).fragments.is_empty());

        top.active = true;
        let active = LayerSet::new([top]).unwrap();
        let ctx = RenderContext::new(Point::ORIGIN, 1.0, Flip::default(), &active);
        assert_eq!(geometry.render_fragments(&ctx).len(), 2);
        println!("✓ Inactive layers are skipped");
    }
}
