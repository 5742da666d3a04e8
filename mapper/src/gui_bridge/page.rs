//! Static Leaflet page that turns `/scene` into map layers.
//!
//! All decisions (colors, radii, popup markup, legend rows) are already in
//! the scene; the script only maps fields onto Leaflet calls.

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Earthquakes, past day</title>
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <style>
    html, body, #map { height: 100%; margin: 0; }
    #status { position: absolute; top: 10px; left: 60px; z-index: 1000; font: 14px sans-serif; background: #fff; padding: 4px 8px; }
    #status:empty { display: none; }
    .legend { background: #fff; padding: 6px 8px; line-height: 18px; color: #555; }
    .legend i { width: 18px; height: 18px; float: left; margin-right: 8px; opacity: 0.7; }
  </style>
</head>
<body>
  <div id="status"></div>
  <div id="map"></div>
  <script>
    function tileLayer(layer) {
      const t = layer.tile;
      return L.tileLayer(t.url_template, {
        attribution: t.attribution_text,
        tileSize: t.tile_size,
        maxZoom: t.max_zoom,
        zoomOffset: t.zoom_offset,
        id: t.style_id,
        accessToken: t.access_token
      });
    }

    function render(scene) {
      const baseMaps = {};
      scene.base_layers.forEach(function (layer) { baseMaps[layer.name] = tileLayer(layer); });

      const markers = scene.overlay.markers.map(function (m) {
        return L.circleMarker([m.event.latitude, m.event.longitude], {
          radius: m.render_radius,
          color: m.encoding.color_bucket
        }).bindPopup(m.encoding.popup_text);
      });
      const overlay = L.layerGroup(markers);
      const overlayMaps = {};
      overlayMaps[scene.overlay.name] = overlay;

      const initial = [baseMaps[scene.view.base_layer]];
      if (scene.view.visible_overlays.indexOf(scene.overlay.name) >= 0) {
        initial.push(overlay);
      }

      const map = L.map("map", { center: scene.view.center, zoom: scene.view.zoom, layers: initial });
      L.control.layers(baseMaps, overlayMaps, { collapsed: scene.control.collapsed }).addTo(map);

      const legend = L.control({ position: scene.legend.position });
      legend.onAdd = function () {
        const div = L.DomUtil.create("div", "info legend");
        div.innerHTML = scene.legend.entries.map(function (e) {
          return '<i style="background:' + e.bucket + '"></i> ' + e.range_label;
        }).join("<br>");
        return div;
      };
      legend.addTo(map);
    }

    fetch("/scene")
      .then(function (resp) {
        return resp.json().then(function (body) {
          if (!resp.ok) { throw new Error(body.status); }
          return body;
        });
      })
      .then(render)
      .catch(function (err) {
        document.getElementById("status").textContent = "Earthquake feed unavailable: " + err.message;
      });
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_reads_scene_fields_by_their_serialized_names() {
        for field in [
            "base_layers",
            "render_radius",
            "color_bucket",
            "popup_text",
            "visible_overlays",
            "range_label",
            "attribution_text",
            "zoom_offset",
        ] {
            assert!(INDEX_HTML.contains(field), "page does not read `{field}`");
        }
        assert!(INDEX_HTML.contains("fetch(\"/scene\")"));
    }
}
