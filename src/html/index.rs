pub const INDEX_HTML: &str = r##"<!doctype html>
<html lang="en">

<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Philippine Travel Planner</title>
  <style>
    * { box-sizing: border-box; }
    body { margin: 0; font-family: system-ui, sans-serif; background: #f3f4f6; }
    .layout { display: flex; gap: 1rem; height: 100vh; padding: 1rem; }
    .map { flex: 1; border-radius: 0.5rem; overflow: hidden; background: #e5e7eb; }
    .map .fallback { padding: 1rem; color: #374151; }
    .chat { width: 33%; min-width: 320px; display: flex; flex-direction: column;
            background: #fff; border-radius: 0.5rem; box-shadow: 0 4px 12px rgba(0,0,0,.1); }
    .messages { flex: 1; overflow-y: auto; padding: 1rem; display: flex; flex-direction: column; gap: 1rem; }
    .row { display: flex; }
    .row.user { justify-content: flex-end; }
    .bubble { max-width: 80%; padding: 0.5rem 1rem; border-radius: 0.5rem; white-space: pre-wrap; }
    .user .bubble { background: #9333ea; color: #fff; }
    .assistant .bubble { background: #f3f4f6; color: #1f2937; }
    form { display: flex; gap: 0.5rem; padding: 1rem; border-top: 1px solid #e5e7eb; }
    input { flex: 1; padding: 0.5rem 1rem; border: 1px solid #d1d5db; border-radius: 0.5rem; }
    button { background: #9333ea; color: #fff; border: 0; padding: 0.5rem 1rem; border-radius: 0.5rem; }
    button:disabled { background: #c084fc; }
    @media (max-width: 768px) { .layout { flex-direction: column; } .chat { width: 100%; height: 500px; } }
  </style>
</head>

<body>
  <div class="layout">
    <div id="map" class="map"></div>
    <div class="chat">
      <div id="messages" class="messages"></div>
      <form id="chat-form">
        <input id="chat-input" type="text" placeholder="Ask about your Philippine travel plans..." />
        <button id="chat-send" type="submit">Send</button>
      </form>
    </div>
  </div>

  <script>
    const MAPS_KEY = "__GOOGLE_MAPS_API_KEY__";
    const PHILIPPINES_CENTER = { lat: 12.8797, lng: 121.7740 };
    const INITIAL_MESSAGE = {
      role: "assistant",
      content: "Hi! I'm your Philippine travel assistant. I can help you plan your perfect trip to the Philippines. What kind of experience are you looking for?"
    };
    const ERROR_MESSAGE = { role: "assistant", content: "I'm sorry, I encountered an error. Please try again." };

    const state = { messages: [INITIAL_MESSAGE], isLoading: false, markers: [] };
    let map = null;
    let pins = [];

    function renderMessages() {
      const list = document.getElementById("messages");
      list.innerHTML = "";
      const rows = state.isLoading
        ? state.messages.concat([{ role: "assistant", content: "Thinking..." }])
        : state.messages;
      for (const message of rows) {
        const row = document.createElement("div");
        row.className = "row " + (message.role === "user" ? "user" : "assistant");
        const bubble = document.createElement("div");
        bubble.className = "bubble";
        bubble.textContent = message.content;
        row.appendChild(bubble);
        list.appendChild(row);
      }
      list.scrollTop = list.scrollHeight;
      document.getElementById("chat-input").disabled = state.isLoading;
      document.getElementById("chat-send").disabled = state.isLoading;
    }

    function renderMarkers() {
      if (!map) {
        const fallback = document.getElementById("map");
        fallback.innerHTML = '<div class="fallback"></div>';
        const box = fallback.firstChild;
        for (const marker of state.markers) {
          const line = document.createElement("div");
          line.textContent = marker.title + " (" + marker.lat + ", " + marker.lng + ")";
          box.appendChild(line);
        }
        return;
      }
      for (const pin of pins) pin.setMap(null);
      pins = state.markers.map(m => new google.maps.Marker({ position: { lat: m.lat, lng: m.lng }, title: m.title, map }));
    }

    async function submit(event) {
      event.preventDefault();
      const input = document.getElementById("chat-input");
      if (!input.value.trim() || state.isLoading) return;

      const userMessage = { role: "user", content: input.value };
      state.messages = state.messages.concat([userMessage]);
      input.value = "";
      state.isLoading = true;
      renderMessages();

      try {
        const response = await fetch("/api/chat", {
          method: "POST",
          headers: { "Content-Type": "application/json" },
          body: JSON.stringify({ messages: state.messages })
        });
        const data = await response.json();
        if (!response.ok || !data.message) throw new Error(data.error || response.statusText);
        state.messages = state.messages.concat([data.message]);
        if (data.locations) {
          state.markers = data.locations;
          renderMarkers();
        }
      } catch (error) {
        console.error("Chat error:", error);
        state.messages = state.messages.concat([ERROR_MESSAGE]);
      } finally {
        state.isLoading = false;
        renderMessages();
      }
    }

    const MAP_STYLES = [
      {
        featureType: "water",
        elementType: "geometry",
        stylers: [{ color: "#e9e9e9" }, { lightness: 17 }]
      },
      {
        featureType: "landscape",
        elementType: "geometry",
        stylers: [{ color: "#f5f5f5" }, { lightness: 20 }]
      },
      {
        featureType: "road.highway",
        elementType: "geometry.fill",
        stylers: [{ color: "#ffffff" }, { lightness: 17 }]
      },
      {
        featureType: "road.highway",
        elementType: "geometry.stroke",
        stylers: [{ color: "#ffffff" }, { lightness: 29 }, { weight: 0.2 }]
      }
    ];

    window.initMap = function () {
      map = new google.maps.Map(document.getElementById("map"), {
        zoom: 6,
        center: PHILIPPINES_CENTER,
        disableDefaultUI: true,
        clickableIcons: true,
        scrollwheel: true,
        styles: MAP_STYLES
      });
      renderMarkers();
    };

    document.getElementById("chat-form").addEventListener("submit", submit);
    renderMessages();
    if (MAPS_KEY) {
      const script = document.createElement("script");
      script.src = "https://maps.googleapis.com/maps/api/js?key=" + MAPS_KEY + "&callback=initMap";
      script.async = true;
      document.head.appendChild(script);
    } else {
      renderMarkers();
    }
  </script>
</body>

</html>
"##;
