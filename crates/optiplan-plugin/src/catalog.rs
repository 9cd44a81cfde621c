// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in plugin catalog.
//!
//! Returns hardcoded `PluginTemplate` entries for the SVG optimization plugins
//! shipped with the default pipeline. No filesystem access is involved.

use optiplan_core::{Params, StockType};
use serde_json::{Value, json};

use crate::template::PluginTemplate;

fn template(
    name: &str,
    stock: StockType,
    active: bool,
    description: &str,
    params: Value,
) -> PluginTemplate {
    let params = match params {
        Value::Object(map) => map,
        _ => Params::new(),
    };
    PluginTemplate {
        name: name.to_string(),
        plugin_type: stock.into(),
        active,
        description: description.to_string(),
        params,
    }
}

/// Returns templates for all built-in plugins, in default pipeline order.
pub fn builtin_catalog() -> Vec<PluginTemplate> {
    use StockType::{Full, PerItem, PerItemReverse};

    let numeric = json!({
        "floatPrecision": 3,
        "leadingZero": true,
        "defaultPx": true,
        "convertToPx": true
    });

    vec![
        template("removeDoctype", PerItem, true, "removes doctype declaration", json!({})),
        template("removeXMLProcInst", PerItem, true, "removes XML processing instructions", json!({})),
        template("removeComments", PerItem, true, "removes comments", json!({})),
        template("removeMetadata", PerItem, true, "removes <metadata>", json!({})),
        template(
            "removeEditorsNSData",
            PerItem,
            true,
            "removes editors namespaces, elements and attributes",
            json!({ "additionalNamespaces": [] }),
        ),
        template(
            "cleanupAttrs",
            PerItem,
            true,
            "cleanups attributes from newlines, trailing and repeating spaces",
            json!({ "newlines": true, "trim": true, "spaces": true }),
        ),
        template("convertStyleToAttrs", PerItem, true, "converts style to attributes", json!({})),
        template(
            "cleanupIDs",
            Full,
            true,
            "removes unused IDs and minifies used",
            json!({ "remove": true, "minify": true, "prefix": "" }),
        ),
        template("removeRasterImages", PerItem, false, "removes raster images", json!({})),
        template("removeUselessDefs", PerItem, true, "removes elements in <defs> without id", json!({})),
        template(
            "cleanupNumericValues",
            PerItem,
            true,
            "rounds numeric values to the fixed precision, removes default px units",
            numeric.clone(),
        ),
        template(
            "cleanupListOfValues",
            PerItem,
            false,
            "rounds list of values to the fixed precision",
            numeric,
        ),
        template(
            "convertColors",
            PerItem,
            true,
            "converts colors: rgb() to #rrggbb and #rrggbb to #rgb",
            json!({ "names2hex": true, "rgb2hex": true, "shorthex": true, "shortname": true }),
        ),
        template(
            "removeUnknownsAndDefaults",
            PerItem,
            true,
            "removes unknown elements content and attributes, removes attrs with default values",
            json!({
                "unknownContent": true,
                "unknownAttrs": true,
                "defaultAttrs": true,
                "uselessOverrides": true,
                "keepDataAttrs": true
            }),
        ),
        template(
            "removeNonInheritableGroupAttrs",
            PerItem,
            true,
            "removes non-inheritable group's presentational attributes",
            json!({}),
        ),
        template(
            "removeUselessStrokeAndFill",
            PerItem,
            true,
            "removes useless stroke and fill attributes",
            json!({ "stroke": true, "fill": true }),
        ),
        template("removeViewBox", PerItem, true, "removes viewBox attribute when possible", json!({})),
        template(
            "cleanupEnableBackground",
            Full,
            true,
            "removes or cleanups enable-background attribute when possible",
            json!({}),
        ),
        template(
            "removeHiddenElems",
            PerItem,
            true,
            "removes hidden elements (zero sized, with absent attributes)",
            json!({
                "displayNone": true,
                "opacity0": true,
                "circleR0": true,
                "ellipseRX0": true,
                "ellipseRY0": true,
                "rectWidth0": true,
                "rectHeight0": true,
                "patternWidth0": true,
                "patternHeight0": true,
                "imageWidth0": true,
                "imageHeight0": true,
                "pathEmptyD": true,
                "polylineEmptyPoints": true,
                "polygonEmptyPoints": true
            }),
        ),
        template(
            "removeEmptyText",
            PerItem,
            true,
            "removes empty <text> elements",
            json!({ "text": true, "tspan": true, "tref": true }),
        ),
        template(
            "convertShapeToPath",
            PerItem,
            true,
            "converts basic shapes to more compact path form",
            json!({}),
        ),
        template(
            "moveElemsAttrsToGroup",
            PerItemReverse,
            true,
            "moves elements attributes to the existing group wrapper",
            json!({}),
        ),
        template(
            "moveGroupAttrsToElems",
            PerItem,
            true,
            "moves some group attributes to the content elements",
            json!({}),
        ),
        template("collapseGroups", PerItemReverse, true, "collapses useless groups", json!({})),
        template(
            "convertPathData",
            PerItem,
            true,
            "optimizes path data: writes in shorter form, applies transformations",
            json!({
                "applyTransforms": true,
                "applyTransformsStroked": true,
                "straightCurves": true,
                "lineShorthands": true,
                "curveSmoothShorthands": true,
                "floatPrecision": 3,
                "removeUseless": true,
                "collapseRepeated": true,
                "utilizeAbsolute": true,
                "leadingZero": true,
                "negativeExtraSpace": true
            }),
        ),
        template(
            "convertTransform",
            PerItem,
            true,
            "collapses multiple transformations and optimizes it",
            json!({
                "convertToShorts": true,
                "floatPrecision": 3,
                "transformPrecision": 5,
                "matrixToTransform": true,
                "shortTranslate": true,
                "shortScale": true,
                "shortRotate": true,
                "removeUseless": true,
                "collapseIntoOne": true,
                "leadingZero": true,
                "negativeExtraSpace": false
            }),
        ),
        template("removeEmptyAttrs", PerItem, true, "removes empty attributes", json!({})),
        template(
            "removeEmptyContainers",
            PerItemReverse,
            true,
            "removes empty container elements",
            json!({}),
        ),
        template(
            "mergePaths",
            PerItem,
            true,
            "merges multiple paths in one if possible",
            json!({ "collapseRepeated": true, "leadingZero": true, "negativeExtraSpace": true }),
        ),
        template("removeUnusedNS", Full, true, "removes unused namespaces declaration", json!({})),
        template(
            "transformsWithOnePath",
            Full,
            false,
            "performs a set of transformations on SVG with one path inside",
            json!({}),
        ),
        template(
            "sortAttrs",
            PerItem,
            false,
            "sorts element attributes",
            json!({
                "order": [
                    "xmlns", "id", "width", "height", "x", "x1", "x2", "y", "y1", "y2",
                    "cx", "cy", "r", "fill", "fill-opacity", "fill-rule", "stroke",
                    "stroke-opacity", "stroke-width", "stroke-linecap", "stroke-linejoin",
                    "stroke-miterlimit", "d", "points"
                ]
            }),
        ),
        template("removeTitle", PerItem, true, "removes <title>", json!({})),
        template("removeDesc", PerItem, true, "removes <desc>", json!({ "removeAny": false })),
        template(
            "removeDimensions",
            PerItem,
            false,
            "removes width and height in presence of viewBox",
            json!({}),
        ),
        template(
            "removeAttrs",
            PerItem,
            false,
            "removes specified attributes",
            json!({ "attrs": [] }),
        ),
        template(
            "addClassesToSVGElement",
            Full,
            false,
            "adds classnames to an outer <svg> element",
            json!({ "classNames": [] }),
        ),
        template("removeStyleElement", PerItem, false, "removes <style> element", json!({})),
    ]
}

/// Search the built-in catalog by query string.
///
/// Filters entries whose name or description contains the query (case-insensitive).
/// If query is empty, returns all entries.
pub fn search_catalog(query: &str) -> Vec<PluginTemplate> {
    if query.is_empty() {
        return builtin_catalog();
    }
    let query_lower = query.to_lowercase();
    builtin_catalog()
        .into_iter()
        .filter(|t| {
            t.name.to_lowercase().contains(&query_lower)
                || t.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}
