// Page shell markup. Element ids must match `constants.rs`.

pub const STYLE: &str = "\
html,body{margin:0;height:100%;overflow:hidden;background:#000;font-family:sans-serif}\
#app-canvas{position:fixed;inset:0;width:100%;height:100%;display:block}\
#start-overlay{position:fixed;inset:0;display:flex;align-items:center;justify-content:center;\
background:rgba(0,0,0,.6);color:#fff;text-align:center;z-index:50}\
#start-overlay h2{font-family:serif;color:#fef3c7;font-size:2.25rem}\
#start-overlay p{color:#d1d5db;max-width:28rem;margin:0 auto 2rem;line-height:1.6}\
#start-overlay button,#controls button{color:#fff;background:rgba(255,255,255,.1);\
border:1px solid rgba(255,255,255,.3);border-radius:999px;padding:.75rem 1.5rem;cursor:pointer}\
#controls{position:fixed;left:0;right:0;bottom:1.5rem;display:flex;flex-direction:column;\
align-items:center;gap:.75rem;color:#fff;z-index:10}\
#controls h1{font-family:serif;letter-spacing:.2em;font-size:1.5rem;margin:0}\
#controls .subtitle{color:#9ca3af;font-size:.75rem;letter-spacing:.1em;text-transform:uppercase;margin:0}\
#controls .row{display:flex;gap:1rem}\
#info{position:fixed;top:1.5rem;right:1.5rem;text-align:right;color:rgba(255,255,255,.3);\
font:12px monospace;z-index:10}";

pub const OVERLAY_HTML: &str = r#"<div id="start-overlay">
  <div>
    <h2>Free and Easy Wandering</h2>
    <p>"In the Northern Ocean there is a fish, the name of which is Kun.<br/>
    The size of Kun is I know not how many thousand li.<br/>
    It changes into a bird with the name of Peng."</p>
    <button id="overlay-enter">Enter the Visualization</button>
  </div>
</div>"#;

pub const CONTROLS_HTML: &str = r#"<div id="controls">
  <h1>Free and Easy Wandering</h1>
  <p class="subtitle">Sound Art Visualization</p>
  <small>Audio drives wave height &amp; particle glow</small>
  <div class="row">
    <button id="play-toggle">Play</button>
    <button id="upload-button">Upload Audio</button>
    <input id="file-input" type="file" accept="audio/*" style="display:none"/>
  </div>
</div>
<div id="info"><p>ZHUANGZI 'XIAOYAOYOU'</p><p>Northern Ocean Fish &rarr; Sky Bird</p></div>"#;
