//! SVG chart rendering for reports.

/// Scree plot of explained-variance ratios with an elbow marker and a
/// marker at the 95%-cumulative-variance component count.
pub fn generate_scree_svg(ratios: &[f64], elbow_index: usize, threshold_count: usize) -> String {
    if ratios.is_empty() {
        return String::new();
    }

    let width = 500.0;
    let height = 200.0;
    let padding = 40.0;

    let plot_width = width - 2.0 * padding;
    let plot_height = height - 2.0 * padding;

    let max_ratio = ratios.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let scale_y = if max_ratio > 0.0 {
        plot_height / max_ratio
    } else {
        1.0
    };
    let scale_x = if ratios.len() > 1 {
        plot_width / (ratios.len() - 1) as f64
    } else {
        0.0
    };

    let x_at = |index: usize| padding + index as f64 * scale_x;

    let points: Vec<String> = ratios
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let x = x_at(i);
            let y = height - padding - r * scale_y;
            format!("{:.1},{:.1}", x, y)
        })
        .collect();
    let polyline = points.join(" ");

    let mut markers = String::new();
    if elbow_index > 0 && elbow_index <= ratios.len() {
        let x = x_at(elbow_index - 1);
        markers.push_str(&format!(
            "  <line x1=\"{x:.1}\" y1=\"{top:.1}\" x2=\"{x:.1}\" y2=\"{bottom:.1}\" \
             stroke=\"orange\" stroke-dasharray=\"4 2\"/>\n  \
             <text x=\"{x:.1}\" y=\"{label:.1}\" font-size=\"10\" fill=\"orange\">elbow</text>\n",
            x = x,
            top = padding,
            bottom = height - padding,
            label = padding - 4.0,
        ));
    }
    if threshold_count > 0 && threshold_count <= ratios.len() {
        let x = x_at(threshold_count - 1);
        markers.push_str(&format!(
            "  <line x1=\"{x:.1}\" y1=\"{top:.1}\" x2=\"{x:.1}\" y2=\"{bottom:.1}\" \
             stroke=\"red\" stroke-dasharray=\"2 2\"/>\n  \
             <text x=\"{x:.1}\" y=\"{label:.1}\" font-size=\"10\" fill=\"red\">95%</text>\n",
            x = x,
            top = padding,
            bottom = height - padding,
            label = height - padding + 12.0,
        ));
    }

    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" \
         viewBox=\"0 0 {width:.0} {height:.0}\">\n  \
         <rect width=\"{width:.0}\" height=\"{height:.0}\" fill=\"white\"/>\n  \
         <line x1=\"{pad:.1}\" y1=\"{pad:.1}\" x2=\"{pad:.1}\" y2=\"{bottom:.1}\" stroke=\"black\"/>\n  \
         <line x1=\"{pad:.1}\" y1=\"{bottom:.1}\" x2=\"{right:.1}\" y2=\"{bottom:.1}\" stroke=\"black\"/>\n  \
         <text x=\"{pad:.1}\" y=\"{xlabel:.1}\" font-size=\"10\">component index</text>\n  \
         <polyline points=\"{polyline}\" fill=\"none\" stroke=\"blue\" stroke-width=\"1.5\"/>\n\
         {markers}</svg>\n",
        width = width,
        height = height,
        pad = padding,
        bottom = height - padding,
        right = width - padding,
        xlabel = height - padding + 24.0,
        polyline = polyline,
        markers = markers,
    )
}
